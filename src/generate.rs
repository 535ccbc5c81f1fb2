//! Generate command: calibration tables -> synthetic daily rainfall file.

use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use cistern_io::{read_calibration, write_daily_csv, write_daily_parquet};
use cistern_synth::{Synthesis, synthesize_parallel, synthesize_with_progress};

use crate::cli::GenerateArgs;
use crate::config::CisternConfig;
use crate::convert::{self, OutputFormat};
use crate::report::RainfallSource;
use crate::size_cmd;

/// Run the generation pipeline and write the rainfall table.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();
    let config = CisternConfig::load(&args.config)?;
    let output_dir = args.output.unwrap_or_else(|| config.io.output_dir.clone());
    let seed = args.seed.unwrap_or(config.seed);

    generate(&config, &output_dir, seed, args.years)?;
    Ok(())
}

/// Generate rainfall, then size the tank on it without re-reading the file.
pub fn run_and_size(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    let config = CisternConfig::load(&args.config)?;
    let output_dir = args.output.unwrap_or_else(|| config.io.output_dir.clone());
    let seed = args.seed.unwrap_or(config.seed);

    let synthesis = generate(&config, &output_dir, seed, args.years)?;
    let source = RainfallSource::Synthetic {
        seed,
        n_years: synthesis.n_years(),
        parallel: config.generate.parallel,
    };
    size_cmd::size(
        &config,
        synthesis.records(),
        synthesis.station(),
        source,
        &output_dir,
    )?;
    Ok(())
}

/// Synthesizes rainfall from the configured calibration tables and writes
/// it to `output_dir` in the configured format.
pub fn generate(
    config: &CisternConfig,
    output_dir: &Path,
    seed: u64,
    years: Option<usize>,
) -> Result<Synthesis> {
    // Step 1: Build configs from TOML
    let synth_cfg = convert::build_synth_config(&config.station, &config.generate, years)?;
    let format = convert::parse_format(&config.io.format)?;
    let parquet = convert::build_parquet_options(&config.io)?;
    let paths = convert::build_calibration_paths(&config.calibration);

    // Step 2: Read calibration tables
    info!(dir = %config.calibration.dir.display(), "reading calibration tables");
    let calibration = read_calibration(&paths).context("failed to read calibration tables")?;

    // Step 3: Synthesize
    let synthesis = if config.generate.parallel {
        synthesize_parallel(&calibration, &synth_cfg, seed)
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        synthesize_with_progress(&calibration, &synth_cfg, &mut rng, |done, total| {
            info!(done, total, "synthetic years generated");
        })
    }
    .context("rainfall synthesis failed")?;
    info!(
        records = synthesis.records().len(),
        wet_days = synthesis.wet_days(),
        mean_wet_rain_mm = synthesis.mean_wet_rain().unwrap_or(0.0),
        "synthetic rainfall ready"
    );

    // Step 4: Write
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create output directory: {}", output_dir.display())
    })?;
    let path = output_dir.join(rainfall_file_name(
        synthesis.station(),
        synthesis.n_years(),
        seed,
        format,
    ));
    match format {
        OutputFormat::Csv => write_daily_csv(&path, synthesis.station(), synthesis.records()),
        OutputFormat::Parquet => {
            write_daily_parquet(&path, synthesis.station(), synthesis.records(), parquet)
        }
    }
    .with_context(|| format!("failed to write rainfall: {}", path.display()))?;
    info!(path = %path.display(), "synthetic rainfall written");

    Ok(synthesis)
}

/// `{station}_synthetic_{n}yrs_seed{seed}.{ext}`, with whitespace in the
/// station label replaced by underscores.
pub fn rainfall_file_name(
    station: &str,
    n_years: usize,
    seed: u64,
    format: OutputFormat,
) -> String {
    let station: String = station
        .chars()
        .map(|c| if c.is_whitespace() || c == '/' { '_' } else { c })
        .collect();
    format!(
        "{station}_synthetic_{n_years}yrs_seed{seed}.{}",
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name() {
        assert_eq!(
            rainfall_file_name("Iloilo Roxas", 1000, 2025, OutputFormat::Csv),
            "Iloilo_Roxas_synthetic_1000yrs_seed2025.csv"
        );
        assert_eq!(
            rainfall_file_name("a/b", 3, 1, OutputFormat::Parquet),
            "a_b_synthetic_3yrs_seed1.parquet"
        );
    }

    #[test]
    fn missing_calibration_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CisternConfig::default();
        config.calibration.dir = dir.path().join("nowhere");
        let err = generate(&config, dir.path(), 1, Some(1)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read calibration tables"));
    }

    #[test]
    fn generate_then_size() {
        let dir = tempfile::tempdir().unwrap();
        let cal = dir.path().join("cal");
        std::fs::create_dir(&cal).unwrap();
        std::fs::write(cal.join("transitions.csv"), "month,pDW\n1,0.4\n").unwrap();
        std::fs::write(
            cal.join("gamma.csv"),
            "month,gamma_k,gamma_theta,gamma_mean\n1,0.8,12.0,\n2,,,6.0\n",
        )
        .unwrap();
        std::fs::write(
            cal.join("spell_fits.csv"),
            "month,type,geom_p,nb_r,nb_p\nall,wet,0.5,,\nall,dry,,2,0.3\n",
        )
        .unwrap();

        let mut config = CisternConfig::default();
        config.station = "Test Site".to_string();
        config.calibration.dir = cal;
        let out = dir.path().join("out");

        let synthesis = generate(&config, &out, 11, Some(3)).unwrap();
        assert_eq!(synthesis.records().len(), 3 * 365);
        let rain_path = out.join("Test_Site_synthetic_3yrs_seed11.csv");
        let table = cistern_io::read_rainfall(&rain_path).unwrap();
        assert_eq!(table.records, synthesis.records());

        let report = size_cmd::size(
            &config,
            synthesis.records(),
            synthesis.station(),
            RainfallSource::Synthetic {
                seed: 11,
                n_years: 3,
                parallel: false,
            },
            &out,
        )
        .unwrap();
        assert_eq!(report.metrics.days, 3 * 365);
        assert_eq!(report.metrics.wet_days, synthesis.wet_days());
        assert!(out.join(size_cmd::REPORT_FILE).exists());
    }

    #[test]
    fn parallel_generation_is_seed_stable() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CisternConfig::default();
        config.calibration.dir = dir.path().to_path_buf();
        config.generate.parallel = true;
        config.io.format = "parquet".to_string();
        for name in ["transitions.csv", "gamma.csv", "spell_fits.csv"] {
            let header = match name {
                "transitions.csv" => "month,pDW\n",
                "gamma.csv" => "month,gamma_k,gamma_theta,gamma_mean\n",
                _ => "month,type,geom_p,nb_r,nb_p\n",
            };
            std::fs::write(dir.path().join(name), header).unwrap();
        }

        let a = generate(&config, &dir.path().join("a"), 5, Some(2)).unwrap();
        let b = generate(&config, &dir.path().join("b"), 5, Some(2)).unwrap();
        assert_eq!(a.records(), b.records());
        assert!(
            dir.path()
                .join("a/Iloilo_Roxas_synthetic_2yrs_seed5.parquet")
                .exists()
        );
    }
}
