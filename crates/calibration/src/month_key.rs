//! Month keys as they appear in calibration tables.

use std::fmt;
use std::str::FromStr;

use crate::error::CalibrationError;

/// Label of the catch-all row used when a month has no fit of its own.
pub const WILDCARD_LABEL: &str = "all";

/// The month column of a calibration row.
///
/// Numeric cells in 1..=12 become [`MonthKey::Month`]; anything else is kept
/// verbatim (trimmed) as a [`MonthKey::Label`], e.g. the `all` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MonthKey {
    /// A calendar month, 1..=12.
    Month(u8),
    /// Free text.
    Label(String),
}

impl MonthKey {
    /// The `all` wildcard key.
    pub fn wildcard() -> Self {
        Self::Label(WILDCARD_LABEL.to_string())
    }

    /// True for a numeric key equal to `month`.
    pub fn is_month(&self, month: u8) -> bool {
        matches!(self, Self::Month(m) if *m == month)
    }

    /// True for a textual key whose text is the decimal form of `month`.
    pub fn is_month_text(&self, month: u8) -> bool {
        match self {
            Self::Label(s) => s.trim() == month.to_string(),
            Self::Month(_) => false,
        }
    }

    /// True for the `all` wildcard. The match is exact: `ALL` or `All` are
    /// ordinary labels.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Label(s) if s == WILDCARD_LABEL)
    }
}

impl FromStr for MonthKey {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CalibrationError::EmptyMonthKey);
        }
        // Spreadsheets often export integer columns as "3.0".
        let numeric = s
            .parse::<u8>()
            .ok()
            .or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.fract() == 0.0 && (1.0..=12.0).contains(v))
                    .map(|v| v as u8)
            })
            .filter(|m| (1..=12).contains(m));
        Ok(match numeric {
            Some(m) => Self::Month(m),
            None => Self::Label(s.to_string()),
        })
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month(m) => write!(f, "{m}"),
            Self::Label(s) => f.write_str(s),
        }
    }
}
