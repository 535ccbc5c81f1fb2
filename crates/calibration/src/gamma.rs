//! Wet-day rainfall amount fits.

use crate::month_key::MonthKey;

/// One row of the gamma table.
///
/// `shape`/`scale` parameterise Gamma(k, θ); `mean` is the fallback used when
/// no valid pair is present.
#[derive(Debug, Clone, PartialEq)]
pub struct GammaFit {
    /// Month the fit applies to.
    pub month: MonthKey,
    /// Shape (k).
    pub shape: Option<f64>,
    /// Scale (θ).
    pub scale: Option<f64>,
    /// Mean wet-day amount in mm.
    pub mean: Option<f64>,
}

impl GammaFit {
    /// A row with a shape/scale pair and no fallback mean.
    pub fn new(month: MonthKey, shape: f64, scale: f64) -> Self {
        Self {
            month,
            shape: Some(shape),
            scale: Some(scale),
            mean: None,
        }
    }

    /// A row with only a fallback mean.
    pub fn from_mean(month: MonthKey, mean: f64) -> Self {
        Self {
            month,
            shape: None,
            scale: None,
            mean: Some(mean),
        }
    }

    /// Returns `(shape, scale)` when both are finite and strictly positive.
    pub fn shape_scale(&self) -> Option<(f64, f64)> {
        match (self.shape, self.scale) {
            (Some(k), Some(theta)) if k.is_finite() && theta.is_finite() && k > 0.0 && theta > 0.0 => {
                Some((k, theta))
            }
            _ => None,
        }
    }

    /// Returns the fallback mean when it is finite.
    pub fn finite_mean(&self) -> Option<f64> {
        self.mean.filter(|m| m.is_finite())
    }
}

/// Outcome of a gamma-table lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GammaResolution<'a> {
    /// Row keyed by the numeric month.
    Exact(&'a GammaFit),
    /// Row keyed by the month's decimal text.
    Textual(&'a GammaFit),
    /// No row for the month.
    Missing,
}

/// Monthly wet-day amount fits.
#[derive(Debug, Clone, Default)]
pub struct GammaTable {
    rows: Vec<GammaFit>,
}

impl GammaTable {
    /// Wraps a list of rows. The first matching row wins.
    pub fn new(rows: Vec<GammaFit>) -> Self {
        Self { rows }
    }

    /// Returns all rows.
    pub fn rows(&self) -> &[GammaFit] {
        &self.rows
    }

    /// Returns `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves the row for a 1-indexed month.
    pub fn resolve(&self, month: u8) -> GammaResolution<'_> {
        if let Some(row) = self.rows.iter().find(|r| r.month.is_month(month)) {
            return GammaResolution::Exact(row);
        }
        match self.rows.iter().find(|r| r.month.is_month_text(month)) {
            Some(row) => GammaResolution::Textual(row),
            None => GammaResolution::Missing,
        }
    }

    /// Mean of every finite `mean` in the table, or `None` when there is none.
    ///
    /// Used as the exponential scale for months without a row.
    pub fn pooled_mean(&self) -> Option<f64> {
        let means: Vec<f64> = self.rows.iter().filter_map(GammaFit::finite_mean).collect();
        if means.is_empty() {
            return None;
        }
        Some(means.iter().sum::<f64>() / means.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shape_scale_validation() {
        assert_eq!(
            GammaFit::new(MonthKey::Month(1), 0.8, 12.0).shape_scale(),
            Some((0.8, 12.0))
        );
        assert_eq!(GammaFit::new(MonthKey::Month(1), 0.0, 12.0).shape_scale(), None);
        assert_eq!(GammaFit::new(MonthKey::Month(1), 0.8, -1.0).shape_scale(), None);
        assert_eq!(
            GammaFit::new(MonthKey::Month(1), f64::NAN, 1.0).shape_scale(),
            None
        );
        assert_eq!(
            GammaFit::new(MonthKey::Month(1), 1.0, f64::INFINITY).shape_scale(),
            None
        );
    }

    #[test]
    fn resolve_exact_then_textual() {
        let table = GammaTable::new(vec![
            GammaFit::from_mean(MonthKey::Label("2".to_string()), 4.0),
            GammaFit::new(MonthKey::Month(1), 1.0, 2.0),
        ]);
        assert!(matches!(table.resolve(1), GammaResolution::Exact(_)));
        assert!(matches!(table.resolve(2), GammaResolution::Textual(_)));
        assert_eq!(table.resolve(3), GammaResolution::Missing);
    }

    #[test]
    fn pooled_mean_ignores_missing_and_nan() {
        let table = GammaTable::new(vec![
            GammaFit::from_mean(MonthKey::Month(1), 4.0),
            GammaFit::from_mean(MonthKey::Month(2), f64::NAN),
            GammaFit::new(MonthKey::Month(3), 1.0, 1.0),
            GammaFit::from_mean(MonthKey::Month(4), 8.0),
        ]);
        assert_relative_eq!(table.pooled_mean().unwrap(), 6.0);
    }

    #[test]
    fn pooled_mean_none_without_means() {
        let table = GammaTable::new(vec![GammaFit::new(MonthKey::Month(1), 1.0, 1.0)]);
        assert_eq!(table.pooled_mean(), None);
        assert_eq!(GammaTable::default().pooled_mean(), None);
    }
}
