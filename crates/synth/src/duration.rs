//! Spell-length sampling.
//!
//! Lengths are numbers of days (trials), always at least 1. Fits that cannot
//! be sampled fall back to a geometric law with [`FALLBACK_GEOM_P`].

use cistern_calibration::{SpellFitTable, SpellKind, SpellParams};
use rand::Rng;
use rand_distr::{Distribution, Gamma, Geometric, Poisson};
use tracing::trace;

/// Success probability of the geometric law used when no fit applies.
pub const FALLBACK_GEOM_P: f64 = 0.2;

/// Largest integer negative-binomial size drawn as a sum of geometrics.
/// Larger sizes use the equivalent gamma-Poisson mixture.
const NB_DIRECT_MAX_R: u64 = 64;

/// Source of spell lengths.
pub trait SpellDuration {
    /// Draws the length in days of a `kind` spell starting in `month`.
    fn sample(&self, month: u8, kind: SpellKind, rng: &mut impl Rng) -> u64;
}

/// Spell lengths drawn from a calibrated [`SpellFitTable`].
#[derive(Debug, Clone, Copy)]
pub struct FittedSpellDuration<'a> {
    table: &'a SpellFitTable,
}

impl<'a> FittedSpellDuration<'a> {
    /// Wraps a spell-fit table.
    pub fn new(table: &'a SpellFitTable) -> Self {
        Self { table }
    }
}

impl SpellDuration for FittedSpellDuration<'_> {
    fn sample(&self, month: u8, kind: SpellKind, rng: &mut impl Rng) -> u64 {
        let params = match self.table.resolve(month, kind).fit() {
            Some(fit) => fit.params(),
            None => SpellParams::Unusable,
        };
        sample_spell_length(params, rng)
    }
}

/// Draws a spell length for the given parameters.
///
/// Negative-binomial draws count failures and add one so the result is a
/// number of days. Any failure to build a distribution, including an
/// overflowing Poisson rate, falls back to geometric([`FALLBACK_GEOM_P`]).
pub fn sample_spell_length(params: SpellParams, rng: &mut impl Rng) -> u64 {
    let drawn = match params {
        SpellParams::Geometric { p } => geometric_trials(p, rng),
        SpellParams::NegBinomial { r, p } => {
            negative_binomial_failures(r, p, rng).map(|k| k.saturating_add(1))
        }
        SpellParams::GammaPoisson { r, p } => {
            gamma_poisson_failures(r, p, rng).map(|k| k.saturating_add(1))
        }
        SpellParams::Unusable => None,
    };
    match drawn {
        Some(len) => len.max(1),
        None => {
            trace!(?params, "spell fit unusable, using fallback geometric");
            geometric_trials(FALLBACK_GEOM_P, rng).unwrap_or(1)
        }
    }
}

/// Number of trials up to and including the first success.
fn geometric_trials(p: f64, rng: &mut impl Rng) -> Option<u64> {
    let dist = Geometric::new(p).ok()?;
    Some(dist.sample(rng).saturating_add(1))
}

fn negative_binomial_failures(r: u64, p: f64, rng: &mut impl Rng) -> Option<u64> {
    if p >= 1.0 {
        return Some(0);
    }
    if r > NB_DIRECT_MAX_R {
        return gamma_poisson_failures(r as f64, p, rng);
    }
    let dist = Geometric::new(p).ok()?;
    Some((0..r).fold(0u64, |acc, _| acc.saturating_add(dist.sample(rng))))
}

/// Failures drawn as Poisson(λ) with λ ~ Gamma(r, (1 - p) / p).
fn gamma_poisson_failures(r: f64, p: f64, rng: &mut impl Rng) -> Option<u64> {
    let scale = (1.0 - p) / p;
    if scale <= 0.0 {
        return Some(0);
    }
    let lambda = Gamma::new(r, scale).ok()?.sample(rng);
    if lambda.is_nan() || lambda <= 0.0 {
        return Some(0);
    }
    let k: f64 = Poisson::new(lambda).ok()?.sample(rng);
    Some(k as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cistern_calibration::{MonthKey, SpellFit};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mean_length(params: SpellParams, n: usize, seed: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let total: u64 = (0..n).map(|_| sample_spell_length(params, &mut rng)).sum();
        total as f64 / n as f64
    }

    #[test]
    fn lengths_are_at_least_one() {
        let mut rng = StdRng::seed_from_u64(1);
        for params in [
            SpellParams::Geometric { p: 1.0 },
            SpellParams::NegBinomial { r: 3, p: 1.0 },
            SpellParams::GammaPoisson { r: 0.5, p: 1.0 },
            SpellParams::Unusable,
        ] {
            for _ in 0..200 {
                assert!(sample_spell_length(params, &mut rng) >= 1);
            }
        }
    }

    #[test]
    fn certain_success_gives_one_day() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            assert_eq!(sample_spell_length(SpellParams::Geometric { p: 1.0 }, &mut rng), 1);
            assert_eq!(
                sample_spell_length(SpellParams::NegBinomial { r: 4, p: 1.0 }, &mut rng),
                1
            );
        }
    }

    #[test]
    fn geometric_mean_matches_one_over_p() {
        let m = mean_length(SpellParams::Geometric { p: 0.25 }, 20_000, 3);
        assert_abs_diff_eq!(m, 4.0, epsilon = 0.2);
    }

    #[test]
    fn negative_binomial_mean() {
        // failures mean r(1-p)/p = 3 * 0.6 / 0.4 = 4.5, plus one day
        let m = mean_length(SpellParams::NegBinomial { r: 3, p: 0.4 }, 20_000, 4);
        assert_abs_diff_eq!(m, 5.5, epsilon = 0.25);
    }

    #[test]
    fn gamma_poisson_mean() {
        // 2.5 * 0.5 / 0.5 + 1
        let m = mean_length(SpellParams::GammaPoisson { r: 2.5, p: 0.5 }, 20_000, 5);
        assert_abs_diff_eq!(m, 3.5, epsilon = 0.2);
    }

    #[test]
    fn large_size_uses_mixture() {
        // 100 * 0.5 / 0.5 + 1
        let m = mean_length(SpellParams::NegBinomial { r: 100, p: 0.5 }, 5_000, 6);
        assert_abs_diff_eq!(m, 101.0, epsilon = 2.0);
    }

    #[test]
    fn unusable_matches_fallback_stream() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let fallback = SpellParams::Geometric {
            p: FALLBACK_GEOM_P,
        };
        for _ in 0..100 {
            assert_eq!(
                sample_spell_length(SpellParams::Unusable, &mut a),
                sample_spell_length(fallback, &mut b)
            );
        }
    }

    #[test]
    fn fitted_uses_table() {
        let table = SpellFitTable::new(vec![SpellFit::geometric(
            MonthKey::Month(1),
            SpellKind::Wet,
            1.0,
        )]);
        let d = FittedSpellDuration::new(&table);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..20 {
            assert_eq!(d.sample(1, SpellKind::Wet, &mut rng), 1);
        }
    }
}
