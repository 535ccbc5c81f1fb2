//! CSV writers for the output tables.

use std::path::Path;

use cistern_balance::{HarvestRecord, MonthlyStats, WaterBalanceResult};
use cistern_synth::DailyRecord;
use serde::Serialize;
use tracing::debug;

use crate::error::IoError;

#[derive(Serialize)]
struct DailyRow<'a> {
    station: &'a str,
    synthetic_year: u32,
    day_of_year: u16,
    month: u8,
    day_in_month: u8,
    rain_mm: f64,
    wet: u8,
}

impl<'a> DailyRow<'a> {
    fn new(station: &'a str, r: &DailyRecord) -> Self {
        Self {
            station,
            synthetic_year: r.synthetic_year,
            day_of_year: r.day_of_year,
            month: r.month,
            day_in_month: r.day_in_month,
            rain_mm: r.rain_mm,
            wet: r.state().as_flag(),
        }
    }
}

#[derive(Serialize)]
struct HarvestRow<'a> {
    station: &'a str,
    synthetic_year: u32,
    day_of_year: u16,
    month: u8,
    day_in_month: u8,
    rain_mm: f64,
    wet: u8,
    #[serde(rename = "harvest_L")]
    harvest_l: f64,
}

#[derive(Serialize)]
struct MonthlyRow<'a> {
    month: u8,
    month_label: &'a str,
    mean_l: f64,
    median_l: f64,
    std_l: f64,
    max_l: f64,
}

#[derive(Serialize)]
struct WaterBalanceRow<'a> {
    scenario: &'a str,
    #[serde(rename = "demand_L_day")]
    demand_l_day: f64,
    #[serde(rename = "tank_L")]
    tank_l: f64,
    reliability_pct: f64,
    shortage_days: u64,
    max_consec_shortage: u64,
    #[serde(rename = "total_overflow_L")]
    total_overflow_l: f64,
}

fn write_rows<T: Serialize>(
    path: &Path,
    rows: impl IntoIterator<Item = T>,
) -> Result<usize, IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    let mut n = 0;
    for row in rows {
        writer.serialize(row).map_err(|e| IoError::csv(path, e))?;
        n += 1;
    }
    writer.flush().map_err(|e| IoError::csv(path, e))?;
    debug!(path = %path.display(), rows = n, "csv written");
    Ok(n)
}

/// Writes daily rainfall records with `wet` as 0/1.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if the file cannot be created or written.
pub fn write_daily_csv(path: &Path, station: &str, records: &[DailyRecord]) -> Result<(), IoError> {
    write_rows(path, records.iter().map(|r| DailyRow::new(station, r)))?;
    Ok(())
}

/// Writes daily records with their harvest in a `harvest_L` column.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if the file cannot be created or written.
pub fn write_harvest_csv(
    path: &Path,
    station: &str,
    records: &[HarvestRecord],
) -> Result<(), IoError> {
    let rows = records.iter().map(|h| {
        let d = DailyRow::new(station, &h.day);
        HarvestRow {
            station: d.station,
            synthetic_year: d.synthetic_year,
            day_of_year: d.day_of_year,
            month: d.month,
            day_in_month: d.day_in_month,
            rain_mm: d.rain_mm,
            wet: d.wet,
            harvest_l: h.harvest_l,
        }
    });
    write_rows(path, rows)?;
    Ok(())
}

/// Writes the twelve-row monthly harvest summary.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if the file cannot be created or written.
pub fn write_monthly_csv(path: &Path, stats: &[MonthlyStats]) -> Result<(), IoError> {
    write_rows(
        path,
        stats.iter().map(|m| MonthlyRow {
            month: m.month,
            month_label: m.month_label,
            mean_l: m.mean_l,
            median_l: m.median_l,
            std_l: m.std_l,
            max_l: m.max_l,
        }),
    )?;
    Ok(())
}

/// Writes the water-balance scan results.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if the file cannot be created or written.
pub fn write_water_balance_csv(path: &Path, results: &[WaterBalanceResult]) -> Result<(), IoError> {
    write_rows(
        path,
        results.iter().map(|r| WaterBalanceRow {
            scenario: &r.scenario,
            demand_l_day: r.demand_l_day,
            tank_l: r.tank_l,
            reliability_pct: r.reliability_pct,
            shortage_days: r.shortage_days,
            max_consec_shortage: r.max_consec_shortage,
            total_overflow_l: r.total_overflow_l,
        }),
    )?;
    Ok(())
}
