//! Error types for the cistern-calendar crate.

/// Error type for all fallible operations in the cistern-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside 1..=365.
    #[error("invalid day of year: {doy} (must be 1..=365)")]
    InvalidDoy {
        /// The rejected day-of-year.
        doy: u16,
    },

    /// Returned when a month number is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The rejected month.
        month: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            CalendarError::InvalidDoy { doy: 366 }.to_string(),
            "invalid day of year: 366 (must be 1..=365)"
        );
        assert_eq!(
            CalendarError::InvalidMonth { month: 0 }.to_string(),
            "invalid month: 0 (must be 1..=12)"
        );
    }

    #[test]
    fn error_is_send_sync_std_error() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
