//! Synthesized daily records.

use cistern_calendar::DAYS_PER_YEAR;
use cistern_calibration::SpellKind;

/// Days in one synthetic year, as a buffer length.
pub const YEAR_LEN: usize = DAYS_PER_YEAR as usize;

/// One synthetic calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyRecord {
    /// 1-based synthetic year.
    pub synthetic_year: u32,
    /// Day of year, 1..=365.
    pub day_of_year: u16,
    /// Month, 1..=12.
    pub month: u8,
    /// Day within the month, from 1.
    pub day_in_month: u8,
    /// Rainfall depth in mm; zero on dry days.
    pub rain_mm: f64,
    /// Wet-day flag.
    pub wet: bool,
}

impl DailyRecord {
    /// Returns the occurrence state of the day.
    pub fn state(&self) -> SpellKind {
        SpellKind::from_wet(self.wet)
    }
}

/// Output of one synthesis run: `n_years × 365` records, year-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    station: String,
    n_years: usize,
    records: Vec<DailyRecord>,
}

impl Synthesis {
    pub(crate) fn new(station: String, n_years: usize, records: Vec<DailyRecord>) -> Self {
        debug_assert_eq!(records.len(), n_years * YEAR_LEN);
        Self {
            station,
            n_years,
            records,
        }
    }

    /// Station label the series was generated for.
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Number of synthetic years.
    pub fn n_years(&self) -> usize {
        self.n_years
    }

    /// All records, year-major and ordered by day of year.
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Records of one 1-based synthetic year, or `None` if out of range.
    pub fn year(&self, year: usize) -> Option<&[DailyRecord]> {
        if year == 0 || year > self.n_years {
            return None;
        }
        let start = (year - 1) * YEAR_LEN;
        Some(&self.records[start..start + YEAR_LEN])
    }

    /// Number of wet days across the whole series.
    pub fn wet_days(&self) -> usize {
        self.records.iter().filter(|r| r.wet).count()
    }

    /// Mean rainfall on wet days, or `None` when there are none.
    pub fn mean_wet_rain(&self) -> Option<f64> {
        let (sum, n) = self
            .records
            .iter()
            .filter(|r| r.wet)
            .fold((0.0, 0usize), |(s, n), r| (s + r.rain_mm, n + 1));
        (n > 0).then(|| sum / n as f64)
    }

    /// Consumes the synthesis, returning the records.
    pub fn into_records(self) -> Vec<DailyRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_of(year: u32, wet_every: usize) -> Vec<DailyRecord> {
        (0..YEAR_LEN)
            .map(|i| {
                let wet = i % wet_every == 0;
                DailyRecord {
                    synthetic_year: year,
                    day_of_year: i as u16 + 1,
                    month: 1,
                    day_in_month: 1,
                    rain_mm: if wet { 2.0 } else { 0.0 },
                    wet,
                }
            })
            .collect()
    }

    #[test]
    fn year_slices() {
        let mut records = year_of(1, 5);
        records.extend(year_of(2, 5));
        let syn = Synthesis::new("X".to_string(), 2, records);
        assert_eq!(syn.year(1).unwrap()[0].synthetic_year, 1);
        assert_eq!(syn.year(2).unwrap()[364].synthetic_year, 2);
        assert!(syn.year(0).is_none());
        assert!(syn.year(3).is_none());
    }

    #[test]
    fn wet_day_summaries() {
        let syn = Synthesis::new("X".to_string(), 1, year_of(1, 5));
        assert_eq!(syn.wet_days(), 73);
        assert_eq!(syn.mean_wet_rain(), Some(2.0));
    }

    #[test]
    fn mean_wet_rain_none_when_dry() {
        let syn = Synthesis::new("X".to_string(), 1, vec![DailyRecord::default(); YEAR_LEN]);
        assert_eq!(syn.mean_wet_rain(), None);
        assert_eq!(syn.records()[0].state(), SpellKind::Dry);
    }
}
