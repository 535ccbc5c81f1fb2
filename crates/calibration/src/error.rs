//! Error types for the cistern-calibration crate.

/// Error type for all fallible operations in the cistern-calibration crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    /// Returned when a spell type is neither `wet` nor `dry`.
    #[error("unknown spell type: {value:?} (expected \"wet\" or \"dry\")")]
    UnknownSpellKind {
        /// The rejected text.
        value: String,
    },

    /// Returned when a month key cell is blank.
    #[error("month key is empty")]
    EmptyMonthKey,
}
