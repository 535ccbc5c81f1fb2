//! Error types for the cistern-balance crate.

/// Error type for all fallible operations in the cistern-balance crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BalanceError {
    /// Returned when a simulation is asked to run over zero days.
    #[error("inflow series is empty")]
    EmptySeries,

    /// Returned when a catchment parameter is out of range.
    #[error("invalid catchment parameter {field}: {value}")]
    InvalidCatchment {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when a demand scenario has a non-positive or non-finite demand.
    #[error("invalid demand for scenario {scenario:?}: {demand} L/day")]
    InvalidDemand {
        /// Scenario name.
        scenario: String,
        /// The rejected daily demand.
        demand: f64,
    },

    /// Returned when a tank capacity is non-positive or non-finite.
    #[error("invalid tank capacity: {capacity} L")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: f64,
    },

    /// Returned when a tank grid does not describe an ascending range.
    #[error("invalid tank grid: min={min}, max={max}, step={step} (need min > 0, step > 0, max > min)")]
    InvalidTankGrid {
        /// Smallest capacity.
        min: f64,
        /// Largest capacity.
        max: f64,
        /// Spacing between capacities.
        step: f64,
    },
}
