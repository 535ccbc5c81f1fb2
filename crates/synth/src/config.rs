//! Configuration for rainfall synthesis.

use crate::error::SynthError;
use crate::record::YEAR_LEN;

/// Configuration for a synthesis run.
///
/// # Example
///
/// ```
/// use cistern_synth::SynthConfig;
///
/// let config = SynthConfig::new()
///     .with_station("Iloilo Roxas")
///     .with_n_years(200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct SynthConfig {
    station: String,
    n_years: usize,
    progress_interval: usize,
}

impl SynthConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `station = "station"`, `n_years = 1000`,
    /// `progress_interval = 50`.
    pub fn new() -> Self {
        Self {
            station: "station".to_string(),
            n_years: 1000,
            progress_interval: 50,
        }
    }

    /// Sets the station label stamped on every record set.
    pub fn with_station(mut self, station: impl Into<String>) -> Self {
        self.station = station.into();
        self
    }

    /// Sets the number of synthetic years.
    pub fn with_n_years(mut self, n_years: usize) -> Self {
        self.n_years = n_years;
        self
    }

    /// Sets how many completed years separate progress reports.
    pub fn with_progress_interval(mut self, years: usize) -> Self {
        self.progress_interval = years;
        self
    }

    // --- Accessors ---

    /// Returns the station label.
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Returns the number of synthetic years.
    pub fn n_years(&self) -> usize {
        self.n_years
    }

    /// Returns the progress interval in years.
    pub fn progress_interval(&self) -> usize {
        self.progress_interval
    }

    /// Total number of daily records the run will produce.
    pub fn n_records(&self) -> usize {
        self.n_years * YEAR_LEN
    }

    /// Validates this configuration.
    ///
    /// Checks that at least one year is requested, that year numbers fit in
    /// `u32`, that the record count does not overflow, and that the progress
    /// interval is non-zero.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.n_years == 0 {
            return Err(SynthError::ZeroYears);
        }
        if u32::try_from(self.n_years).is_err() || self.n_years.checked_mul(YEAR_LEN).is_none() {
            return Err(SynthError::TooManyYears {
                n_years: self.n_years,
            });
        }
        if self.progress_interval == 0 {
            return Err(SynthError::ZeroProgressInterval);
        }
        Ok(())
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SynthConfig::new();
        assert_eq!(c.station(), "station");
        assert_eq!(c.n_years(), 1000);
        assert_eq!(c.progress_interval(), 50);
        assert_eq!(c.n_records(), 365_000);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_years_rejected() {
        let c = SynthConfig::new().with_n_years(0);
        assert_eq!(c.validate().unwrap_err(), SynthError::ZeroYears);
    }

    #[test]
    fn huge_year_count_rejected() {
        let c = SynthConfig::new().with_n_years(usize::MAX);
        assert_eq!(
            c.validate().unwrap_err(),
            SynthError::TooManyYears {
                n_years: usize::MAX
            }
        );
    }

    #[test]
    fn zero_progress_interval_rejected() {
        let c = SynthConfig::new().with_progress_interval(0);
        assert_eq!(c.validate().unwrap_err(), SynthError::ZeroProgressInterval);
    }
}
