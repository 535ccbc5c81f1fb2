//! Calibration tables for the semi-Markov rainfall synthesizer.
//!
//! Three immutable lookups, each keyed by month:
//!
//! ```text
//!  ┌────────────────────┐   ┌─────────────────┐   ┌───────────────────┐
//!  │  TransitionTable   │   │   GammaTable    │   │   SpellFitTable   │
//!  │  P(day 1 is wet)   │   │  wet-day amount │   │  wet/dry run len  │
//!  └────────────────────┘   └─────────────────┘   └───────────────────┘
//! ```
//!
//! Fit lookups never fail. They return a tagged resolution
//! ([`FitResolution`], [`GammaResolution`]) and callers decide which
//! fallback distribution to use.
//!
//! # Quick start
//!
//! ```rust
//! use cistern_calibration::{FitResolution, MonthKey, SpellFit, SpellFitTable, SpellKind};
//!
//! let table = SpellFitTable::new(vec![
//!     SpellFit::geometric(MonthKey::Month(1), SpellKind::Wet, 0.4),
//!     SpellFit::geometric(MonthKey::wildcard(), SpellKind::Wet, 0.3),
//! ]);
//!
//! assert!(matches!(table.resolve(1, SpellKind::Wet), FitResolution::Exact(_)));
//! assert!(matches!(table.resolve(7, SpellKind::Wet), FitResolution::Wildcard(_)));
//! assert!(matches!(table.resolve(7, SpellKind::Dry), FitResolution::NoFit));
//! ```

pub mod error;
pub mod gamma;
pub mod month_key;
pub mod spell;
pub mod transition;

pub use error::CalibrationError;
pub use gamma::{GammaFit, GammaResolution, GammaTable};
pub use month_key::MonthKey;
pub use spell::{FitResolution, SpellFit, SpellFitTable, SpellKind, SpellParams};
pub use transition::{DEFAULT_WET_START_PROB, TransitionTable};

/// The three calibration tables consumed by one synthesis run.
#[derive(Debug, Clone, Default)]
pub struct Calibration {
    /// Probability that a month starts wet.
    pub transitions: TransitionTable,
    /// Wet-day rainfall amount fits.
    pub gamma: GammaTable,
    /// Wet and dry spell-length fits.
    pub spells: SpellFitTable,
}

impl Calibration {
    /// Bundles the three tables.
    pub fn new(transitions: TransitionTable, gamma: GammaTable, spells: SpellFitTable) -> Self {
        Self {
            transitions,
            gamma,
            spells,
        }
    }
}
