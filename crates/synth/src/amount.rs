//! Wet-day rainfall amount sampling.

use cistern_calibration::{GammaFit, GammaResolution, GammaTable};
use rand::Rng;
use rand_distr::{Distribution, Exp, Gamma};

/// Floor on a row's own mean when it is used as an exponential scale.
pub const MIN_ROW_MEAN_MM: f64 = 0.1;

/// Floor on the pooled mean used for months without a row.
pub const MIN_POOLED_MEAN_MM: f64 = 1.0;

/// Source of wet-day rainfall amounts in mm.
pub trait RainAmount {
    /// Draws a non-negative amount for a wet day in `month`.
    fn sample(&self, month: u8, rng: &mut impl Rng) -> f64;
}

/// Amounts drawn from a calibrated [`GammaTable`].
///
/// Per-month order of preference: Gamma(k, θ) from a valid pair, then an
/// exponential with the row's mean (at least 0.1 mm), then zero. Months
/// without a row use an exponential with the table's pooled mean (at least
/// 1 mm), or zero when the table has no means at all. An empty table
/// always yields zero.
#[derive(Debug, Clone, Copy)]
pub struct FittedRainAmount<'a> {
    table: &'a GammaTable,
    pooled_scale: Option<f64>,
}

impl<'a> FittedRainAmount<'a> {
    /// Wraps a gamma table, caching its pooled mean.
    pub fn new(table: &'a GammaTable) -> Self {
        Self {
            table,
            pooled_scale: table.pooled_mean().map(|m| m.max(MIN_POOLED_MEAN_MM)),
        }
    }
}

impl RainAmount for FittedRainAmount<'_> {
    fn sample(&self, month: u8, rng: &mut impl Rng) -> f64 {
        if self.table.is_empty() {
            return 0.0;
        }
        let amount = match self.table.resolve(month) {
            GammaResolution::Exact(row) | GammaResolution::Textual(row) => from_row(row, rng),
            GammaResolution::Missing => self
                .pooled_scale
                .map_or(0.0, |scale| exponential(scale, rng)),
        };
        amount.max(0.0)
    }
}

fn from_row(row: &GammaFit, rng: &mut impl Rng) -> f64 {
    if let Some((shape, scale)) = row.shape_scale()
        && let Ok(gamma) = Gamma::new(shape, scale)
    {
        return gamma.sample(rng);
    }
    match row.finite_mean() {
        Some(mean) => exponential(mean.max(MIN_ROW_MEAN_MM), rng),
        None => 0.0,
    }
}

fn exponential(scale: f64, rng: &mut impl Rng) -> f64 {
    Exp::new(1.0 / scale).map_or(0.0, |d| d.sample(rng))
}
