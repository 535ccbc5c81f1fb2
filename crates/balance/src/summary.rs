//! Monthly harvest statistics.

use cistern_calendar::MONTH_LABELS;
use statrs::statistics::{Data, Median, Statistics};
use tracing::debug;

use crate::harvest::HarvestRecord;

/// Harvest statistics for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStats {
    /// Month, 1..=12.
    pub month: u8,
    /// Three-letter month name.
    pub month_label: &'static str,
    /// Mean daily harvest in litres.
    pub mean_l: f64,
    /// Median daily harvest in litres.
    pub median_l: f64,
    /// Sample standard deviation (N−1) in litres.
    pub std_l: f64,
    /// Largest daily harvest in litres.
    pub max_l: f64,
}

/// Daily harvest statistics grouped by calendar month.
///
/// Always returns twelve rows, January first. A month with no records
/// reports zero everywhere, and the standard deviation is zero with fewer
/// than two values.
pub fn monthly_summary(records: &[HarvestRecord]) -> Vec<MonthlyStats> {
    let mut by_month: [Vec<f64>; 12] = Default::default();
    for h in records {
        match h.day.month {
            m @ 1..=12 => by_month[(m - 1) as usize].push(h.harvest_l),
            m => debug!(month = m, "skipping record with out-of-range month"),
        }
    }

    by_month
        .into_iter()
        .zip(MONTH_LABELS)
        .enumerate()
        .map(|(i, (values, label))| month_stats(i as u8 + 1, label, values))
        .collect()
}

fn month_stats(month: u8, month_label: &'static str, values: Vec<f64>) -> MonthlyStats {
    if values.is_empty() {
        return MonthlyStats {
            month,
            month_label,
            mean_l: 0.0,
            median_l: 0.0,
            std_l: 0.0,
            max_l: 0.0,
        };
    }
    let mean_l = Statistics::mean(values.iter());
    let std_l = if values.len() < 2 {
        0.0
    } else {
        Statistics::std_dev(values.iter())
    };
    let max_l = Statistics::max(values.iter());
    let median_l = Median::median(&Data::new(values));
    MonthlyStats {
        month,
        month_label,
        mean_l,
        median_l,
        std_l,
        max_l,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cistern_synth::DailyRecord;

    fn h(month: u8, harvest_l: f64) -> HarvestRecord {
        HarvestRecord {
            day: DailyRecord {
                month,
                ..DailyRecord::default()
            },
            harvest_l,
        }
    }

    #[test]
    fn twelve_rows_with_labels() {
        let s = monthly_summary(&[]);
        assert_eq!(s.len(), 12);
        assert_eq!(s[0].month_label, "Jan");
        assert_eq!(s[11].month, 12);
        assert!(s.iter().all(|m| m.mean_l == 0.0 && m.max_l == 0.0));
    }

    #[test]
    fn statistics_per_month() {
        let records = [h(3, 1.0), h(3, 2.0), h(3, 3.0), h(3, 4.0), h(7, 10.0)];
        let s = monthly_summary(&records);

        let mar = &s[2];
        assert_relative_eq!(mar.mean_l, 2.5);
        assert_relative_eq!(mar.median_l, 2.5);
        assert_relative_eq!(mar.std_l, (5.0f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(mar.max_l, 4.0);

        let jul = &s[6];
        assert_relative_eq!(jul.mean_l, 10.0);
        assert_relative_eq!(jul.median_l, 10.0);
        assert_eq!(jul.std_l, 0.0);

        assert_eq!(s[0].mean_l, 0.0);
    }

    #[test]
    fn odd_count_median() {
        let records = [h(1, 0.0), h(1, 9.0), h(1, 1.0)];
        assert_relative_eq!(monthly_summary(&records)[0].median_l, 1.0);
    }
}
