//! # cistern-io
//!
//! Read calibration tables and external rainfall series from CSV, and write
//! the daily, harvest, monthly and water-balance tables to CSV (daily
//! rainfall optionally to Parquet).

mod calibration_csv;
mod csv_write;
mod error;
mod parquet_write;
mod rainfall_csv;
mod table;
mod validate;

pub use calibration_csv::{
    CalibrationPaths, read_calibration, read_gamma, read_spell_fits, read_transitions,
};
pub use csv_write::{
    write_daily_csv, write_harvest_csv, write_monthly_csv, write_water_balance_csv,
};
pub use error::IoError;
pub use parquet_write::{DEFAULT_ROWS_PER_GROUP, ParquetCodec, ParquetOptions, write_daily_parquet};
pub use rainfall_csv::{REQUIRED_COLUMNS, RainfallTable, read_rainfall};
