//! Semi-Markov daily rainfall synthesizer.
//!
//! Each synthetic year is a sequence of alternating wet and dry spells.
//! Spell lengths come from monthly negative-binomial or geometric fits and
//! wet-day amounts from monthly gamma fits, all held in a
//! [`cistern_calibration::Calibration`].
//!
//! # Pipeline
//!
//! ```text
//!  ┌───────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  duration     │────▶│   automaton    │◀────│     amount       │
//!  │ (spell days)  │     │ (one year)     │     │  (wet-day mm)    │
//!  └───────────────┘     └───────┬────────┘     └──────────────────┘
//!                                │
//!                        ┌───────▼────────┐
//!                        │   synthesize   │
//!                        │ (n_years×365)  │
//!                        └────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use cistern_calibration::Calibration;
//! use cistern_synth::{SynthConfig, synthesize};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // An empty calibration still produces a valid, if dry, series.
//! let calibration = Calibration::default();
//! let config = SynthConfig::new().with_n_years(2);
//! let mut rng = StdRng::seed_from_u64(2025);
//!
//! let syn = synthesize(&calibration, &config, &mut rng).unwrap();
//! assert_eq!(syn.records().len(), 730);
//! ```

pub mod amount;
pub mod automaton;
pub mod config;
pub mod duration;
pub mod error;
pub mod record;
pub mod synthesize;

pub use amount::{FittedRainAmount, RainAmount};
pub use automaton::{SpellAutomaton, round_mm};
pub use config::SynthConfig;
pub use duration::{FALLBACK_GEOM_P, FittedSpellDuration, SpellDuration, sample_spell_length};
pub use error::SynthError;
pub use record::{DailyRecord, Synthesis, YEAR_LEN};
pub use synthesize::{synthesize, synthesize_parallel, synthesize_with_progress, year_seed};
