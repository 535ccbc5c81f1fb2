//! Row-level validation for tabular input.
//!
//! A table is scanned to the end before failing so that one run reports
//! every bad cell, not just the first.

use crate::error::IoError;

/// Number of cell errors spelled out in the error details.
const MAX_LISTED: usize = 20;

/// One rejected cell.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BadCell {
    row: usize,
    column: &'static str,
    value: String,
}

/// Collects rejected cells and turns them into one [`IoError::Validation`].
pub(crate) struct CellErrors {
    cells: Vec<BadCell>,
}

impl CellErrors {
    pub(crate) fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Records an invalid cell of a 1-based data row.
    pub(crate) fn invalid_cell(&mut self, row: usize, column: &'static str, value: &str) {
        self.cells.push(BadCell {
            row,
            column,
            value: value.to_string(),
        });
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// `Ok(())` when nothing was recorded.
    ///
    /// Otherwise the details list the first [`MAX_LISTED`] cells joined with
    /// `"; "`, followed by a count of the rest.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.cells.is_empty() {
            return Ok(());
        }
        let count = self.cells.len();
        let mut details = self
            .cells
            .iter()
            .take(MAX_LISTED)
            .map(|c| format!("row {}: invalid {} {:?}", c.row, c.column, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        if count > MAX_LISTED {
            details.push_str(&format!("; ... and {} more", count - MAX_LISTED));
        }
        Err(IoError::Validation { count, details })
    }
}
