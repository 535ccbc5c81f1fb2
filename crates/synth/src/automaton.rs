//! Alternating wet/dry spell process over one synthetic year.

use cistern_calendar::Doy;
use cistern_calibration::SpellKind;
use rand::Rng;

use crate::amount::RainAmount;
use crate::duration::SpellDuration;
use crate::error::SynthError;
use crate::record::{DailyRecord, YEAR_LEN};

/// Rounds a rainfall depth to 4 decimal places.
pub fn round_mm(x: f64) -> f64 {
    (x * 1e4).round() / 1e4
}

/// Semi-Markov occurrence process: spells of sampled length alternate
/// between wet and dry, and each wet day draws an amount.
///
/// The spell length is drawn for the month in which the spell starts and a
/// spell running past 31 December is truncated. The next year starts afresh
/// from its own wet/dry draw.
#[derive(Debug, Clone)]
pub struct SpellAutomaton<D, A> {
    durations: D,
    amounts: A,
    wet_start_prob: f64,
}

impl<D: SpellDuration, A: RainAmount> SpellAutomaton<D, A> {
    /// Creates an automaton. `wet_start_prob` is the probability that
    /// 1 January of each year begins a wet spell.
    pub fn new(durations: D, amounts: A, wet_start_prob: f64) -> Self {
        Self {
            durations,
            amounts,
            wet_start_prob,
        }
    }

    /// Returns the probability that a year starts wet.
    pub fn wet_start_prob(&self) -> f64 {
        self.wet_start_prob
    }

    /// Fills `out` with the 365 records of `year`.
    ///
    /// Returns the number of spells started.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::BufferLengthMismatch`] if `out.len() != 365`.
    pub fn run_year(
        &self,
        year: u32,
        rng: &mut impl Rng,
        out: &mut [DailyRecord],
    ) -> Result<usize, SynthError> {
        if out.len() != YEAR_LEN {
            return Err(SynthError::BufferLengthMismatch {
                expected: YEAR_LEN,
                got: out.len(),
            });
        }

        let mut state = SpellKind::from_wet(rng.random::<f64>() < self.wet_start_prob);
        let mut cursor = Some(Doy::FIRST);
        let mut spells = 0;

        while let Some(start) = cursor {
            let length = self.durations.sample(start.month(), state, rng).max(1);
            spells += 1;
            for _ in 0..length {
                let Some(doy) = cursor else { break };
                let (month, day_in_month) = doy.month_day();
                let rain_mm = match state {
                    SpellKind::Wet => round_mm(self.amounts.sample(month, rng)),
                    SpellKind::Dry => 0.0,
                };
                out[doy.index()] = DailyRecord {
                    synthetic_year: year,
                    day_of_year: doy.get(),
                    month,
                    day_in_month,
                    rain_mm,
                    wet: state == SpellKind::Wet,
                };
                cursor = doy.succ();
            }
            state = state.flip();
        }
        Ok(spells)
    }
}
