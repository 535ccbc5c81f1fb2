//! Reader for externally supplied daily rainfall tables.

use std::path::Path;

use cistern_calendar::{Doy, days_in_month};
use cistern_synth::DailyRecord;
use tracing::info;

use crate::error::IoError;
use crate::table::{Columns, cell, open_csv, parse_optional_f64, parse_whole};
use crate::validate::CellErrors;

/// Columns a rainfall table must carry. Extra columns are ignored, except
/// `station`, which is read if present.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "synthetic_year",
    "day_of_year",
    "month",
    "day_in_month",
    "rain_mm",
    "wet",
];

/// Daily records read from a CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallTable {
    /// Station label from the first row's `station` cell, if any.
    pub station: Option<String>,
    /// Records in file order.
    pub records: Vec<DailyRecord>,
}

/// Reads a rainfall table.
///
/// `rain_mm` cells that are blank, unparsable or non-finite are read as 0.
/// `wet` accepts `0`/`1` (or any number, non-zero meaning wet) and
/// `true`/`false`; anything else is derived from `rain_mm > 0`. Calendar
/// columns must hold valid whole numbers.
///
/// # Errors
///
/// Returns [`IoError::MissingColumns`] if a required column is absent and
/// [`IoError::Validation`] listing every row with an invalid calendar cell.
pub fn read_rainfall(path: &Path) -> Result<RainfallTable, IoError> {
    let mut reader = open_csv(path)?;
    let columns = Columns::from_reader(&mut reader, path)?;
    let [year_idx, doy_idx, month_idx, dim_idx, rain_idx, wet_idx] =
        columns.require(path, REQUIRED_COLUMNS)?;
    let station_idx = columns.position("station");

    let mut station = None;
    let mut records = Vec::new();
    let mut errors = CellErrors::new();

    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| IoError::csv(path, e))?;
        if station.is_none() && station_idx.is_some() {
            let s = cell(&record, station_idx);
            if !s.is_empty() {
                station = Some(s.to_string());
            }
        }

        let raw_year = cell(&record, Some(year_idx));
        let synthetic_year = parse_whole(raw_year)
            .and_then(|v| u32::try_from(v).ok())
            .filter(|&y| y >= 1);
        let raw_doy = cell(&record, Some(doy_idx));
        let day_of_year = parse_whole(raw_doy)
            .and_then(|v| u16::try_from(v).ok())
            .and_then(|d| Doy::new(d).ok());
        let raw_month = cell(&record, Some(month_idx));
        let month = parse_whole(raw_month)
            .and_then(|v| u8::try_from(v).ok())
            .filter(|&m| days_in_month(m).is_ok());
        let raw_day = cell(&record, Some(dim_idx));
        let day_in_month = parse_whole(raw_day)
            .and_then(|v| u8::try_from(v).ok())
            .filter(|&d| d >= 1 && month.is_none_or(|m| days_in_month(m).is_ok_and(|max| d <= max)));

        let rain_mm = parse_optional_f64(cell(&record, Some(rain_idx)))
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        let wet = parse_flag(cell(&record, Some(wet_idx))).unwrap_or(rain_mm > 0.0);

        match (synthetic_year, day_of_year, month, day_in_month) {
            (Some(synthetic_year), Some(doy), Some(month), Some(day_in_month)) => {
                records.push(DailyRecord {
                    synthetic_year,
                    day_of_year: doy.get(),
                    month,
                    day_in_month,
                    rain_mm,
                    wet,
                });
            }
            _ => {
                if synthetic_year.is_none() {
                    errors.invalid_cell(row, "synthetic_year", raw_year);
                }
                if day_of_year.is_none() {
                    errors.invalid_cell(row, "day_of_year", raw_doy);
                }
                if month.is_none() {
                    errors.invalid_cell(row, "month", raw_month);
                }
                if day_in_month.is_none() {
                    errors.invalid_cell(row, "day_in_month", raw_day);
                }
            }
        }
    }
    errors.finish()?;

    info!(path = %path.display(), rows = records.len(), "rainfall table loaded");
    Ok(RainfallTable { station, records })
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim() {
        t if t.eq_ignore_ascii_case("true") => Some(true),
        t if t.eq_ignore_ascii_case("false") => Some(false),
        t => t.parse::<f64>().ok().filter(|v| !v.is_nan()).map(|v| v != 0.0),
    }
}
