//! Daily rainfall as Parquet.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float64Array, RecordBatch, StringArray, UInt8Array, UInt16Array, UInt32Array,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use cistern_synth::DailyRecord;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::error::IoError;

/// Row group length used when none is configured: 1000 synthetic years.
pub const DEFAULT_ROWS_PER_GROUP: usize = 365_000;

const ZSTD_LEVEL: i32 = 3;

/// Column codec, parsed from `none`, `snappy` or `zstd` in any case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParquetCodec {
    Uncompressed,
    #[default]
    Snappy,
    Zstd,
}

impl ParquetCodec {
    fn compression(self) -> Result<Compression, IoError> {
        Ok(match self {
            Self::Uncompressed => Compression::UNCOMPRESSED,
            Self::Snappy => Compression::SNAPPY,
            Self::Zstd => Compression::ZSTD(ZstdLevel::try_new(ZSTD_LEVEL)?),
        })
    }
}

impl FromStr for ParquetCodec {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::Uncompressed),
            "snappy" => Ok(Self::Snappy),
            "zstd" => Ok(Self::Zstd),
            _ => Err(IoError::UnknownCodec {
                name: s.to_string(),
            }),
        }
    }
}

/// Layout of the daily rainfall file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParquetOptions {
    pub codec: ParquetCodec,
    /// Rows per row group; 365 rows hold one synthetic year.
    pub rows_per_group: usize,
}

impl Default for ParquetOptions {
    fn default() -> Self {
        Self {
            codec: ParquetCodec::default(),
            rows_per_group: DEFAULT_ROWS_PER_GROUP,
        }
    }
}

/// Columns mirror the daily CSV: `station`, `synthetic_year`, `day_of_year`,
/// `month`, `day_in_month`, `rain_mm`, `wet` (0/1).
fn daily_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("station", DataType::Utf8, false),
        Field::new("synthetic_year", DataType::UInt32, false),
        Field::new("day_of_year", DataType::UInt16, false),
        Field::new("month", DataType::UInt8, false),
        Field::new("day_in_month", DataType::UInt8, false),
        Field::new("rain_mm", DataType::Float64, false),
        Field::new("wet", DataType::UInt8, false),
    ]))
}

fn daily_batch(
    station: &str,
    records: &[DailyRecord],
    schema: &SchemaRef,
) -> Result<RecordBatch, IoError> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec![station; records.len()])),
        Arc::new(UInt32Array::from_iter_values(
            records.iter().map(|r| r.synthetic_year),
        )),
        Arc::new(UInt16Array::from_iter_values(
            records.iter().map(|r| r.day_of_year),
        )),
        Arc::new(UInt8Array::from_iter_values(records.iter().map(|r| r.month))),
        Arc::new(UInt8Array::from_iter_values(
            records.iter().map(|r| r.day_in_month),
        )),
        Arc::new(Float64Array::from_iter_values(
            records.iter().map(|r| r.rain_mm),
        )),
        Arc::new(UInt8Array::from_iter_values(
            records.iter().map(|r| r.state().as_flag()),
        )),
    ];
    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

/// Writes daily rainfall to `path`, streaming one row group at a time.
///
/// # Errors
///
/// Returns [`IoError::Validation`] when `rows_per_group` is zero and
/// [`IoError::Parquet`] when encoding or file I/O fails.
pub fn write_daily_parquet(
    path: &Path,
    station: &str,
    records: &[DailyRecord],
    options: ParquetOptions,
) -> Result<(), IoError> {
    if options.rows_per_group == 0 {
        return Err(IoError::Validation {
            count: 1,
            details: "rows per row group must be at least 1".to_string(),
        });
    }

    let schema = daily_schema();
    let props = WriterProperties::builder()
        .set_compression(options.codec.compression()?)
        .set_max_row_group_size(options.rows_per_group)
        .build();
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: format!("{}: {e}", path.display()),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(props))?;
    for chunk in records.chunks(options.rows_per_group) {
        writer.write(&daily_batch(station, chunk, &schema)?)?;
    }
    writer.close()?;

    info!(path = %path.display(), rows = records.len(), codec = ?options.codec, "parquet written");
    Ok(())
}
