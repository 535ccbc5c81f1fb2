//! Error types for the cistern-synth crate.

/// Error type for all fallible operations in the cistern-synth crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthError {
    /// Returned when zero synthetic years are requested.
    #[error("n_years must be at least 1")]
    ZeroYears,

    /// Returned when the requested record count cannot be addressed.
    #[error("too many synthetic years: {n_years}")]
    TooManyYears {
        /// Requested number of years.
        n_years: usize,
    },

    /// Returned when the progress interval is zero.
    #[error("progress interval must be at least 1 year")]
    ZeroProgressInterval,

    /// Returned when a year buffer has the wrong length.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },
}
