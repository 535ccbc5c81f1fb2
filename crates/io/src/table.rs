//! Shared helpers for header-addressed CSV tables.

use std::fs::File;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use crate::error::IoError;

/// Opens a headed CSV file with whitespace trimming.
pub(crate) fn open_csv(path: &Path) -> Result<Reader<File>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| IoError::csv(path, e))
}

/// Column positions looked up by header name.
pub(crate) struct Columns {
    names: Vec<String>,
}

impl Columns {
    /// Reads the header row of `reader`.
    pub(crate) fn from_reader(reader: &mut Reader<File>, path: &Path) -> Result<Self, IoError> {
        let headers = reader.headers().map_err(|e| IoError::csv(path, e))?;
        Ok(Self {
            names: headers.iter().map(|h| h.trim().to_string()).collect(),
        })
    }

    /// Position of a column, if present.
    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Positions of every required column, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingColumns`] listing all absent columns.
    pub(crate) fn require<const N: usize>(
        &self,
        path: &Path,
        required: [&str; N],
    ) -> Result<[usize; N], IoError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| self.position(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IoError::MissingColumns {
                path: path.to_path_buf(),
                columns: missing,
            });
        }
        Ok(required.map(|name| self.position(name).unwrap_or_default()))
    }
}

/// The cell at `idx`, or `""` when the column or cell is absent.
pub(crate) fn cell(record: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).unwrap_or("")
}

/// Parses a numeric cell. Blank or unparsable cells become `None`.
pub(crate) fn parse_optional_f64(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse().ok()
}

/// Parses a non-negative whole number, accepting `"3"` and `"3.0"`.
pub(crate) fn parse_whole(s: &str) -> Option<u64> {
    let s = s.trim();
    s.parse::<u64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
            .map(|v| v as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_f64() {
        assert_eq!(parse_optional_f64(" 0.25 "), Some(0.25));
        assert_eq!(parse_optional_f64(""), None);
        assert_eq!(parse_optional_f64("n/a"), None);
        assert!(parse_optional_f64("NaN").unwrap().is_nan());
    }

    #[test]
    fn whole_numbers() {
        assert_eq!(parse_whole("12"), Some(12));
        assert_eq!(parse_whole("12.0"), Some(12));
        assert_eq!(parse_whole("12.5"), None);
        assert_eq!(parse_whole("-1"), None);
        assert_eq!(parse_whole("x"), None);
    }

    #[test]
    fn cell_defaults_to_empty() {
        let rec = StringRecord::from(vec!["a", "b"]);
        assert_eq!(cell(&rec, Some(1)), "b");
        assert_eq!(cell(&rec, Some(5)), "");
        assert_eq!(cell(&rec, None), "");
    }
}
