//! Rooftop rainwater harvest.

use cistern_synth::DailyRecord;
use tracing::debug;

use crate::error::BalanceError;

/// Roof catchment and collection losses.
///
/// One millimetre of rain over one square metre of roof is one litre.
///
/// # Example
///
/// ```
/// use cistern_balance::CatchmentConfig;
///
/// let roof = CatchmentConfig::new().with_n_units(2).with_first_flush_mm(1.0);
/// assert!(roof.validate().is_ok());
/// assert_eq!(roof.catchment_area_m2(), 126.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CatchmentConfig {
    area_per_unit_m2: f64,
    n_units: u32,
    runoff_coeff: f64,
    gutter_eff: f64,
    first_flush_mm: f64,
}

impl CatchmentConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `area_per_unit_m2 = 63`, `n_units = 4`,
    /// `runoff_coeff = 0.90`, `gutter_eff = 0.95`, `first_flush_mm = 2.0`.
    pub fn new() -> Self {
        Self {
            area_per_unit_m2: 63.0,
            n_units: 4,
            runoff_coeff: 0.90,
            gutter_eff: 0.95,
            first_flush_mm: 2.0,
        }
    }

    /// Sets the roof area of one unit (classroom) in m².
    pub fn with_area_per_unit_m2(mut self, area: f64) -> Self {
        self.area_per_unit_m2 = area;
        self
    }

    /// Sets the number of roof units.
    pub fn with_n_units(mut self, n: u32) -> Self {
        self.n_units = n;
        self
    }

    /// Sets the runoff coefficient.
    pub fn with_runoff_coeff(mut self, c: f64) -> Self {
        self.runoff_coeff = c;
        self
    }

    /// Sets the gutter efficiency.
    pub fn with_gutter_eff(mut self, e: f64) -> Self {
        self.gutter_eff = e;
        self
    }

    /// Sets the first-flush depth diverted before collection, in mm.
    pub fn with_first_flush_mm(mut self, mm: f64) -> Self {
        self.first_flush_mm = mm;
        self
    }

    // --- Accessors ---

    /// Returns the roof area of one unit in m².
    pub fn area_per_unit_m2(&self) -> f64 {
        self.area_per_unit_m2
    }

    /// Returns the number of roof units.
    pub fn n_units(&self) -> u32 {
        self.n_units
    }

    /// Returns the runoff coefficient.
    pub fn runoff_coeff(&self) -> f64 {
        self.runoff_coeff
    }

    /// Returns the gutter efficiency.
    pub fn gutter_eff(&self) -> f64 {
        self.gutter_eff
    }

    /// Returns the first-flush depth in mm.
    pub fn first_flush_mm(&self) -> f64 {
        self.first_flush_mm
    }

    /// Total catchment area in m².
    pub fn catchment_area_m2(&self) -> f64 {
        self.area_per_unit_m2 * f64::from(self.n_units)
    }

    /// Validates this configuration.
    ///
    /// Area and first flush must be finite and non-negative, there must be at
    /// least one unit, and both efficiencies must lie in `[0, 1]`.
    pub fn validate(&self) -> Result<(), BalanceError> {
        let non_negative = |field, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(BalanceError::InvalidCatchment { field, value })
            }
        };
        let fraction = |field, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(BalanceError::InvalidCatchment { field, value })
            }
        };

        non_negative("area_per_unit_m2", self.area_per_unit_m2)?;
        if self.n_units == 0 {
            return Err(BalanceError::InvalidCatchment {
                field: "n_units",
                value: 0.0,
            });
        }
        fraction("runoff_coeff", self.runoff_coeff)?;
        fraction("gutter_eff", self.gutter_eff)?;
        non_negative("first_flush_mm", self.first_flush_mm)?;
        Ok(())
    }
}

impl Default for CatchmentConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Litres collected from one day's rain.
///
/// The first flush is subtracted from the depth before scaling; depths at or
/// below it yield nothing.
pub fn harvest_litres(rain_mm: f64, config: &CatchmentConfig) -> f64 {
    let effective = (rain_mm - config.first_flush_mm).max(0.0);
    effective * config.catchment_area_m2() * config.runoff_coeff * config.gutter_eff
}

/// A daily record with its harvested volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarvestRecord {
    /// The rainfall day.
    pub day: DailyRecord,
    /// Litres collected that day.
    pub harvest_l: f64,
}

/// Computes the harvest for every day, ordered by (synthetic year, day of
/// year). The sort is stable, so duplicate days keep their input order.
///
/// # Errors
///
/// Returns an error if `config` fails validation.
pub fn compute_harvest(
    records: &[DailyRecord],
    config: &CatchmentConfig,
) -> Result<Vec<HarvestRecord>, BalanceError> {
    config.validate()?;
    let mut out: Vec<HarvestRecord> = records
        .iter()
        .map(|&day| HarvestRecord {
            day,
            harvest_l: harvest_litres(day.rain_mm, config),
        })
        .collect();
    out.sort_by_key(|h| (h.day.synthetic_year, h.day.day_of_year));
    debug!(
        days = out.len(),
        area_m2 = config.catchment_area_m2(),
        "harvest computed"
    );
    Ok(out)
}

/// Daily inflows in record order.
pub fn inflows(records: &[HarvestRecord]) -> Vec<f64> {
    records.iter().map(|h| h.harvest_l).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn day(year: u32, doy: u16, rain_mm: f64) -> DailyRecord {
        DailyRecord {
            synthetic_year: year,
            day_of_year: doy,
            month: 1,
            day_in_month: 1,
            rain_mm,
            wet: rain_mm > 0.0,
        }
    }

    #[test]
    fn five_mm_over_four_classrooms() {
        // (5 - 2) mm × 252 m² × 0.9 × 0.95
        assert_relative_eq!(
            harvest_litres(5.0, &CatchmentConfig::new()),
            646.38,
            epsilon = 1e-9
        );
    }

    #[test]
    fn below_first_flush_is_zero() {
        let c = CatchmentConfig::new();
        assert_eq!(harvest_litres(1.0, &c), 0.0);
        assert_eq!(harvest_litres(2.0, &c), 0.0);
        assert_eq!(harvest_litres(0.0, &c), 0.0);
    }

    #[test]
    fn no_first_flush() {
        let c = CatchmentConfig::new()
            .with_first_flush_mm(0.0)
            .with_runoff_coeff(1.0)
            .with_gutter_eff(1.0)
            .with_n_units(1)
            .with_area_per_unit_m2(10.0);
        assert_relative_eq!(harvest_litres(3.5, &c), 35.0);
    }

    #[test]
    fn validate_ranges() {
        assert!(CatchmentConfig::new().validate().is_ok());
        assert_eq!(
            CatchmentConfig::new()
                .with_area_per_unit_m2(-1.0)
                .validate()
                .unwrap_err(),
            BalanceError::InvalidCatchment {
                field: "area_per_unit_m2",
                value: -1.0
            }
        );
        assert!(CatchmentConfig::new().with_n_units(0).validate().is_err());
        assert!(CatchmentConfig::new().with_runoff_coeff(1.1).validate().is_err());
        assert!(CatchmentConfig::new().with_gutter_eff(-0.1).validate().is_err());
        assert!(
            CatchmentConfig::new()
                .with_first_flush_mm(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn compute_harvest_sorts_by_year_and_day() {
        let records = [day(2, 1, 10.0), day(1, 2, 3.0), day(1, 1, 0.0)];
        let out = compute_harvest(&records, &CatchmentConfig::new()).unwrap();
        let keys: Vec<_> = out
            .iter()
            .map(|h| (h.day.synthetic_year, h.day.day_of_year))
            .collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (2, 1)]);
        assert_eq!(out[0].harvest_l, 0.0);
        assert!(out[2].harvest_l > out[1].harvest_l);
        assert_eq!(inflows(&out).len(), 3);
    }

    #[test]
    fn compute_harvest_rejects_bad_config() {
        let c = CatchmentConfig::new().with_n_units(0);
        assert!(compute_harvest(&[day(1, 1, 5.0)], &c).is_err());
    }
}
