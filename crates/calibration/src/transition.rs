//! Monthly wet-start probabilities.

use tracing::debug;

use crate::month_key::MonthKey;

/// Probability used for months without a usable `pDW` value.
pub const DEFAULT_WET_START_PROB: f64 = 0.3;

/// Probability that the first day of each month is wet (1-indexed months).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTable {
    wet_prob: [f64; 12],
}

impl TransitionTable {
    /// Builds the table from `(month, pDW)` rows.
    ///
    /// Only numeric month keys are used and the first row per month wins.
    /// Missing or NaN values keep [`DEFAULT_WET_START_PROB`].
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a MonthKey, Option<f64>)>,
    {
        let mut wet_prob = [DEFAULT_WET_START_PROB; 12];
        let mut seen = [false; 12];
        for (key, p_dw) in rows {
            let &MonthKey::Month(m) = key else {
                debug!(month = %key, "ignoring non-numeric transition row");
                continue;
            };
            if !(1..=12).contains(&m) {
                continue;
            }
            let idx = (m - 1) as usize;
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            if let Some(p) = p_dw.filter(|p| !p.is_nan()) {
                wet_prob[idx] = p;
            }
        }
        Self { wet_prob }
    }

    /// Returns the wet-start probability for a 1-indexed month.
    ///
    /// # Panics
    ///
    /// Panics if `month` is 0 or greater than 12.
    pub fn wet_prob(&self, month: u8) -> f64 {
        assert!(
            (1..=12).contains(&month),
            "month must be 1..=12, got {month}"
        );
        self.wet_prob[(month - 1) as usize]
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self {
            wet_prob: [DEFAULT_WET_START_PROB; 12],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let t = TransitionTable::default();
        assert!((1..=12).all(|m| t.wet_prob(m) == DEFAULT_WET_START_PROB));
    }

    #[test]
    fn from_rows_fills_known_months() {
        let jan = MonthKey::Month(1);
        let mar = MonthKey::Month(3);
        let all = MonthKey::wildcard();
        let t = TransitionTable::from_rows([
            (&jan, Some(0.55)),
            (&mar, Some(f64::NAN)),
            (&all, Some(0.9)),
        ]);
        assert_eq!(t.wet_prob(1), 0.55);
        assert_eq!(t.wet_prob(2), DEFAULT_WET_START_PROB);
        assert_eq!(t.wet_prob(3), DEFAULT_WET_START_PROB);
    }

    #[test]
    fn first_row_wins() {
        let jan = MonthKey::Month(1);
        let t = TransitionTable::from_rows([(&jan, Some(0.1)), (&jan, Some(0.8))]);
        assert_eq!(t.wet_prob(1), 0.1);
    }

    #[test]
    fn first_row_wins_even_when_nan() {
        let jan = MonthKey::Month(1);
        let t = TransitionTable::from_rows([(&jan, None), (&jan, Some(0.8))]);
        assert_eq!(t.wet_prob(1), DEFAULT_WET_START_PROB);
    }

    #[test]
    #[should_panic(expected = "month must be 1..=12")]
    fn wet_prob_panics_out_of_range() {
        TransitionTable::default().wet_prob(13);
    }
}
