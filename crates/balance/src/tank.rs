//! Daily storage balance of a single tank.

use crate::error::BalanceError;

/// Rounds to 2 decimal places.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Running state of one tank under a fixed daily demand.
///
/// Each day the inflow is added first; anything above capacity spills before
/// the demand is drawn. A day whose available water falls short of the
/// demand empties the tank and counts as a shortage.
#[derive(Debug, Clone, PartialEq)]
pub struct TankState {
    capacity_l: f64,
    storage_l: f64,
    days: u64,
    shortage_days: u64,
    current_run: u64,
    max_run: u64,
    overflow_l: f64,
}

impl TankState {
    /// A full tank.
    pub fn new(capacity_l: f64) -> Self {
        Self::with_storage(capacity_l, capacity_l)
    }

    /// A tank holding `storage_l`, clamped to `[0, capacity_l]`.
    pub fn with_storage(capacity_l: f64, storage_l: f64) -> Self {
        Self {
            capacity_l,
            storage_l: storage_l.clamp(0.0, capacity_l),
            days: 0,
            shortage_days: 0,
            current_run: 0,
            max_run: 0,
            overflow_l: 0.0,
        }
    }

    /// Advances one day. Returns `true` when the demand was met.
    pub fn step(&mut self, inflow_l: f64, demand_l: f64) -> bool {
        self.days += 1;
        let mut available = self.storage_l + inflow_l;
        if available > self.capacity_l {
            self.overflow_l += available - self.capacity_l;
            available = self.capacity_l;
        }
        if available >= demand_l {
            self.storage_l = available - demand_l;
            self.current_run = 0;
            true
        } else {
            self.storage_l = 0.0;
            self.shortage_days += 1;
            self.current_run += 1;
            self.max_run = self.max_run.max(self.current_run);
            false
        }
    }

    /// Water currently stored, in litres.
    pub fn storage_l(&self) -> f64 {
        self.storage_l
    }

    /// Terminal metrics for the days simulated so far.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::EmptySeries`] if no day has been simulated.
    pub fn outcome(&self) -> Result<TankOutcome, BalanceError> {
        if self.days == 0 {
            return Err(BalanceError::EmptySeries);
        }
        let shortage_frac = self.shortage_days as f64 / self.days as f64;
        Ok(TankOutcome {
            reliability_pct: round2(100.0 * (1.0 - shortage_frac)),
            shortage_days: self.shortage_days,
            max_consec_shortage: self.max_run,
            total_overflow_l: round2(self.overflow_l),
        })
    }
}

/// Summary of one tank run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankOutcome {
    /// Percentage of days on which demand was met, 2 decimals.
    pub reliability_pct: f64,
    /// Number of days with unmet demand.
    pub shortage_days: u64,
    /// Longest run of consecutive shortage days.
    pub max_consec_shortage: u64,
    /// Litres spilled over the whole run, 2 decimals.
    pub total_overflow_l: f64,
}

/// Runs a full tank over `inflows` with a constant daily demand.
///
/// # Errors
///
/// Returns [`BalanceError::EmptySeries`] if `inflows` is empty.
pub fn simulate_tank(
    inflows: &[f64],
    capacity_l: f64,
    demand_l: f64,
) -> Result<TankOutcome, BalanceError> {
    let mut tank = TankState::new(capacity_l);
    for &inflow in inflows {
        tank.step(inflow, demand_l);
    }
    tank.outcome()
}
