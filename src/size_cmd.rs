//! Size command: rainfall -> harvest -> water-balance scan -> recommendation.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span, warn};

use cistern_balance::{
    compute_harvest, inflows, monthly_summary, recommend_tank, water_balance_scan,
};
use cistern_io::{
    read_rainfall, write_harvest_csv, write_monthly_csv, write_water_balance_csv,
};
use cistern_synth::DailyRecord;

use crate::cli::SizeArgs;
use crate::config::CisternConfig;
use crate::convert;
use crate::report::{HeadlineMetrics, Parameters, RainfallSource, RunReport};

/// Daily harvest table.
pub const HARVEST_FILE: &str = "harvest_daily.csv";
/// Monthly harvest summary.
pub const MONTHLY_FILE: &str = "harvest_monthly.csv";
/// Full scan results.
pub const WATER_BALANCE_FILE: &str = "water_balance_results.csv";
/// JSON run report.
pub const REPORT_FILE: &str = "report.json";

/// Run the sizing pipeline over an existing rainfall CSV.
pub fn run(args: SizeArgs) -> Result<()> {
    let _cmd = info_span!("size").entered();
    let config = CisternConfig::load(&args.config)?;
    let rainfall = args
        .rainfall
        .or_else(|| config.io.rainfall.clone())
        .ok_or_else(|| {
            anyhow!("no rainfall path: set [io].rainfall in config or use --rainfall")
        })?;
    let output_dir = args.output.unwrap_or_else(|| config.io.output_dir.clone());

    info!(path = %rainfall.display(), "reading rainfall");
    let table = read_rainfall(&rainfall)
        .with_context(|| format!("failed to read rainfall CSV: {}", rainfall.display()))?;
    if table.records.is_empty() {
        bail!("rainfall CSV has no rows: {}", rainfall.display());
    }
    info!(days = table.records.len(), "rainfall loaded");

    let station = table.station.unwrap_or_else(|| config.station.clone());
    size(
        &config,
        &table.records,
        &station,
        RainfallSource::File { path: rainfall },
        &output_dir,
    )?;
    Ok(())
}

/// Computes the harvest, scans every (scenario, tank) pair, picks the
/// recommended tank and writes the three CSV tables plus the JSON report
/// into `output_dir`.
pub fn size(
    config: &CisternConfig,
    records: &[DailyRecord],
    station: &str,
    source: RainfallSource,
    output_dir: &Path,
) -> Result<RunReport> {
    // Step 1: Build configs from TOML
    let catchment = convert::build_catchment(&config.design)?;
    let students = convert::total_students(config)?;
    let scenarios = convert::build_scenarios(&config.demand, students)?;
    let grid = convert::build_grid(&config.tank)?;
    convert::check_recommend(&config.recommend, &scenarios)?;

    // Step 2: Harvest
    let harvest = compute_harvest(records, &catchment).context("harvest computation failed")?;
    let monthly = monthly_summary(&harvest);
    let metrics = HeadlineMetrics::compute(&harvest, &catchment, students);
    info!(
        area_m2 = metrics.catchment_area_m2,
        total_harvest_l = metrics.total_harvest_l,
        mean_daily_harvest_l = metrics.mean_daily_harvest_l,
        "harvest computed"
    );

    // Step 3: Water-balance scan
    let capacities = grid.capacities().context("invalid tank grid")?;
    let results = water_balance_scan(&inflows(&harvest), &scenarios, &capacities)
        .context("water-balance scan failed")?;

    // Step 4: Recommendation
    let target = config.recommend.reliability_target;
    let recommendation = recommend_tank(&results, &config.recommend.scenario, target);
    match &recommendation {
        Some(r) => info!(
            scenario = %r.scenario,
            tank_l = r.tank_l,
            reliability_pct = r.reliability_pct,
            "recommended tank"
        ),
        None => warn!(
            scenario = %config.recommend.scenario,
            target,
            max_tank_l = config.tank.max_l,
            "no scanned tank reaches the reliability target; try a larger maximum"
        ),
    }

    // Step 5: Write outputs
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create output directory: {}", output_dir.display())
    })?;
    let harvest_path = output_dir.join(HARVEST_FILE);
    write_harvest_csv(&harvest_path, station, &harvest)
        .with_context(|| format!("failed to write harvest: {}", harvest_path.display()))?;
    let monthly_path = output_dir.join(MONTHLY_FILE);
    write_monthly_csv(&monthly_path, &monthly)
        .with_context(|| format!("failed to write monthly summary: {}", monthly_path.display()))?;
    let wb_path = output_dir.join(WATER_BALANCE_FILE);
    write_water_balance_csv(&wb_path, &results)
        .with_context(|| format!("failed to write water balance: {}", wb_path.display()))?;
    info!(dir = %output_dir.display(), rows = results.len(), "sizing tables written");

    let report = RunReport {
        station: station.to_string(),
        rainfall: source,
        parameters: Parameters::new(config, &scenarios),
        metrics,
        recommendation: recommendation.as_ref().map(Into::into),
    };
    report.write(&output_dir.join(REPORT_FILE))?;
    Ok(report)
}
