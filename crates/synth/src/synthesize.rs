//! Multi-year synthesis drivers.

use cistern_calibration::Calibration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::amount::FittedRainAmount;
use crate::automaton::SpellAutomaton;
use crate::config::SynthConfig;
use crate::duration::FittedSpellDuration;
use crate::error::SynthError;
use crate::record::{DailyRecord, Synthesis, YEAR_LEN};

/// Golden-ratio multiplier used to spread year indices across the seed space.
const YEAR_SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seed of the independent RNG stream for a 1-based synthetic year.
pub fn year_seed(master_seed: u64, year: u32) -> u64 {
    master_seed ^ u64::from(year).wrapping_mul(YEAR_SEED_MIX)
}

fn fitted_automaton(
    calibration: &Calibration,
) -> SpellAutomaton<FittedSpellDuration<'_>, FittedRainAmount<'_>> {
    SpellAutomaton::new(
        FittedSpellDuration::new(&calibration.spells),
        FittedRainAmount::new(&calibration.gamma),
        calibration.transitions.wet_prob(1),
    )
}

/// Generates `n_years` synthetic years from one sequential RNG stream.
///
/// # Errors
///
/// Returns an error if `config` fails validation.
pub fn synthesize(
    calibration: &Calibration,
    config: &SynthConfig,
    rng: &mut impl Rng,
) -> Result<Synthesis, SynthError> {
    synthesize_with_progress(calibration, config, rng, |_, _| {})
}

/// Like [`synthesize`], calling `on_progress(done, total)` every
/// `config.progress_interval()` years and after the final year.
///
/// # Errors
///
/// Returns an error if `config` fails validation.
#[tracing::instrument(skip_all, fields(station = config.station(), n_years = config.n_years()))]
pub fn synthesize_with_progress(
    calibration: &Calibration,
    config: &SynthConfig,
    rng: &mut impl Rng,
    mut on_progress: impl FnMut(usize, usize),
) -> Result<Synthesis, SynthError> {
    config.validate()?;
    let n_years = config.n_years();
    let automaton = fitted_automaton(calibration);
    debug!(
        wet_start_prob = automaton.wet_start_prob(),
        "starting sequential synthesis"
    );

    let mut records = vec![DailyRecord::default(); config.n_records()];
    let mut spells = 0usize;
    for (idx, chunk) in records.chunks_mut(YEAR_LEN).enumerate() {
        spells += automaton.run_year(idx as u32 + 1, rng, chunk)?;
        let done = idx + 1;
        if done % config.progress_interval() == 0 || done == n_years {
            on_progress(done, n_years);
        }
    }

    info!(records = records.len(), spells, "synthesis complete");
    Ok(Synthesis::new(config.station().to_string(), n_years, records))
}

/// Generates `n_years` synthetic years in parallel.
///
/// Each year draws from its own `StdRng` seeded with
/// [`year_seed`]`(master_seed, year)`, so the output depends only on
/// `master_seed` and not on thread scheduling. The streams differ from the
/// sequential driver's, so results are not interchangeable with
/// [`synthesize`].
///
/// # Errors
///
/// Returns an error if `config` fails validation.
#[tracing::instrument(skip_all, fields(station = config.station(), n_years = config.n_years()))]
pub fn synthesize_parallel(
    calibration: &Calibration,
    config: &SynthConfig,
    master_seed: u64,
) -> Result<Synthesis, SynthError> {
    config.validate()?;
    let n_years = config.n_years();
    let automaton = fitted_automaton(calibration);

    let mut records = vec![DailyRecord::default(); config.n_records()];
    let spells = records
        .par_chunks_mut(YEAR_LEN)
        .enumerate()
        .map(|(idx, chunk)| {
            let year = idx as u32 + 1;
            let mut rng = StdRng::seed_from_u64(year_seed(master_seed, year));
            automaton.run_year(year, &mut rng, chunk)
        })
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    info!(records = records.len(), spells, "parallel synthesis complete");
    Ok(Synthesis::new(config.station().to_string(), n_years, records))
}
