//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use cistern_balance::{CatchmentConfig, DemandScenario, TankGrid};
use cistern_io::{CalibrationPaths, ParquetCodec, ParquetOptions};
use cistern_synth::SynthConfig;

use crate::config::*;

/// Output format of the synthetic rainfall table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated text.
    Csv,
    /// Apache Parquet.
    Parquet,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

/// Parses an output format name string into the corresponding enum variant.
pub fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "csv" => Ok(OutputFormat::Csv),
        "parquet" => Ok(OutputFormat::Parquet),
        other => bail!("unknown output format: {other:?}"),
    }
}

/// Resolves the three calibration file paths.
pub fn build_calibration_paths(cal: &CalibrationToml) -> CalibrationPaths {
    let mut paths = CalibrationPaths::in_dir(&cal.dir);
    if let Some(ref p) = cal.transitions {
        paths.transitions = p.clone();
    }
    if let Some(ref p) = cal.gamma {
        paths.gamma = p.clone();
    }
    if let Some(ref p) = cal.spells {
        paths.spells = p.clone();
    }
    paths
}

/// Builds a [`SynthConfig`] from the TOML generate section.
///
/// `years` overrides `[generate].n_years` when set.
pub fn build_synth_config(
    station: &str,
    generate: &GenerateToml,
    years: Option<usize>,
) -> Result<SynthConfig> {
    let cfg = SynthConfig::new()
        .with_station(station)
        .with_n_years(years.unwrap_or(generate.n_years))
        .with_progress_interval(generate.progress_interval);
    cfg.validate().context("invalid [generate] settings")?;
    Ok(cfg)
}

/// Builds a [`CatchmentConfig`] from the TOML design section.
pub fn build_catchment(design: &DesignToml) -> Result<CatchmentConfig> {
    let cfg = CatchmentConfig::new()
        .with_area_per_unit_m2(design.area_per_class_m2)
        .with_n_units(design.n_classes)
        .with_runoff_coeff(design.runoff_coeff)
        .with_gutter_eff(design.gutter_eff)
        .with_first_flush_mm(design.first_flush_mm);
    cfg.validate().context("invalid [design] settings")?;
    Ok(cfg)
}

/// Student head count from the design section.
pub fn total_students(config: &CisternConfig) -> Result<u32> {
    config.total_students().with_context(|| {
        format!(
            "[design] n_classes ({}) x students_per_class ({}) does not fit in a u32",
            config.design.n_classes, config.design.students_per_class
        )
    })
}

/// Builds the demand scenarios for `students` people.
///
/// Names must be unique and at least one scenario is required.
pub fn build_scenarios(demand: &[DemandToml], students: u32) -> Result<Vec<DemandScenario>> {
    if demand.is_empty() {
        bail!("at least one [[demand]] scenario is required");
    }
    if students == 0 {
        bail!("[design] must describe at least one student");
    }
    let mut scenarios: Vec<DemandScenario> = Vec::with_capacity(demand.len());
    for d in demand {
        if scenarios.iter().any(|s| s.name() == d.name) {
            bail!("duplicate demand scenario: {:?}", d.name);
        }
        let s = DemandScenario::per_capita(&d.name, d.litres_per_student, students);
        s.validate().context("invalid [[demand]] entry")?;
        scenarios.push(s);
    }
    Ok(scenarios)
}

/// Builds a [`TankGrid`] from the TOML tank section.
pub fn build_grid(tank: &TankToml) -> Result<TankGrid> {
    let grid = TankGrid::new(tank.min_l, tank.max_l, tank.step_l);
    grid.validate().context("invalid [tank] settings")?;
    Ok(grid)
}

/// Checks that the recommendation targets a scanned scenario and a
/// percentage in `0..=100`.
pub fn check_recommend(recommend: &RecommendToml, scenarios: &[DemandScenario]) -> Result<()> {
    if !scenarios.iter().any(|s| s.name() == recommend.scenario) {
        bail!(
            "recommendation scenario {:?} is not among the [[demand]] scenarios",
            recommend.scenario
        );
    }
    let t = recommend.reliability_target;
    if !(0.0..=100.0).contains(&t) {
        bail!("reliability_target must be in [0, 100], got {t}");
    }
    Ok(())
}

/// Builds the Parquet layout from the TOML I/O configuration.
pub fn build_parquet_options(io: &IoToml) -> Result<ParquetOptions> {
    let codec: ParquetCodec = io.compression.parse().context("invalid [io] compression")?;
    if io.row_group_size == 0 {
        bail!("[io] row_group_size must be at least 1");
    }
    Ok(ParquetOptions {
        codec,
        rows_per_group: io.row_group_size,
    })
}
