//! Exhaustive scan over demand scenarios and tank capacities.

use rayon::prelude::*;
use tracing::info;

use crate::error::BalanceError;
use crate::tank::simulate_tank;

/// Default per-person demand levels in L/person/day, in scan order.
pub const DEFAULT_DEMAND_LEVELS: [(&str, f64); 3] =
    [("Low", 2.0), ("Baseline", 5.0), ("High", 10.0)];

/// A named constant daily demand.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandScenario {
    name: String,
    demand_l_day: f64,
}

impl DemandScenario {
    /// A scenario drawing `demand_l_day` litres every day.
    pub fn new(name: impl Into<String>, demand_l_day: f64) -> Self {
        Self {
            name: name.into(),
            demand_l_day,
        }
    }

    /// A scenario drawing `litres_per_person` for each of `persons`.
    pub fn per_capita(name: impl Into<String>, litres_per_person: f64, persons: u32) -> Self {
        Self::new(name, litres_per_person * f64::from(persons))
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Daily demand in litres.
    pub fn demand_l_day(&self) -> f64 {
        self.demand_l_day
    }

    /// Checks that the demand is finite and positive.
    pub fn validate(&self) -> Result<(), BalanceError> {
        if !self.demand_l_day.is_finite() || self.demand_l_day <= 0.0 {
            return Err(BalanceError::InvalidDemand {
                scenario: self.name.clone(),
                demand: self.demand_l_day,
            });
        }
        Ok(())
    }
}

/// The Low / Baseline / High scenarios for `persons` people.
pub fn default_scenarios(persons: u32) -> Vec<DemandScenario> {
    DEFAULT_DEMAND_LEVELS
        .iter()
        .map(|&(name, lpd)| DemandScenario::per_capita(name, lpd, persons))
        .collect()
}

/// Largest number of capacities a grid may expand to.
pub const MAX_TANK_GRID_POINTS: usize = 100_000;

/// Evenly spaced tank capacities `min, min + step, …` up to `max` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankGrid {
    min_l: f64,
    max_l: f64,
    step_l: f64,
}

impl TankGrid {
    /// Creates a grid. Call [`TankGrid::validate`] before use.
    pub fn new(min_l: f64, max_l: f64, step_l: f64) -> Self {
        Self {
            min_l,
            max_l,
            step_l,
        }
    }

    /// Smallest capacity.
    pub fn min_l(&self) -> f64 {
        self.min_l
    }

    /// Largest capacity.
    pub fn max_l(&self) -> f64 {
        self.max_l
    }

    /// Spacing.
    pub fn step_l(&self) -> f64 {
        self.step_l
    }

    /// Whole steps from `min` to `max`.
    fn steps(&self) -> f64 {
        // Tolerance keeps `max` when (max - min) / step is integral up to rounding.
        ((self.max_l - self.min_l) / self.step_l + 1e-9).floor()
    }

    /// Requires finite values with `min > 0`, `step > 0`, `max > min` and at
    /// most [`MAX_TANK_GRID_POINTS`] capacities.
    pub fn validate(&self) -> Result<(), BalanceError> {
        let finite = self.min_l.is_finite() && self.max_l.is_finite() && self.step_l.is_finite();
        if !finite
            || self.min_l <= 0.0
            || self.step_l <= 0.0
            || self.max_l <= self.min_l
            || self.steps() >= MAX_TANK_GRID_POINTS as f64
        {
            return Err(BalanceError::InvalidTankGrid {
                min: self.min_l,
                max: self.max_l,
                step: self.step_l,
            });
        }
        Ok(())
    }

    /// Capacities in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid fails validation.
    pub fn capacities(&self) -> Result<Vec<f64>, BalanceError> {
        self.validate()?;
        let n = self.steps() as usize;
        Ok((0..=n)
            .map(|i| self.min_l + i as f64 * self.step_l)
            .collect())
    }
}

impl Default for TankGrid {
    /// 500 L to 20 000 L in 500 L steps.
    fn default() -> Self {
        Self::new(500.0, 20_000.0, 500.0)
    }
}

/// Metrics for one (scenario, tank) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterBalanceResult {
    /// Scenario name.
    pub scenario: String,
    /// Daily demand in litres.
    pub demand_l_day: f64,
    /// Tank capacity in litres.
    pub tank_l: f64,
    /// Percentage of days with demand met, 2 decimals.
    pub reliability_pct: f64,
    /// Days with unmet demand.
    pub shortage_days: u64,
    /// Longest run of unmet days.
    pub max_consec_shortage: u64,
    /// Total spill in litres, 2 decimals.
    pub total_overflow_l: f64,
}

/// Simulates every (scenario, capacity) pair over the same inflow series.
///
/// Pairs run in parallel; the output is scenario-major in the given
/// scenario order, then in the given capacity order.
///
/// # Errors
///
/// Returns [`BalanceError::EmptySeries`] for empty inflows, or a validation
/// error for a non-positive demand or capacity.
#[tracing::instrument(skip_all, fields(days = inflows.len(), scenarios = scenarios.len(), tanks = capacities.len()))]
pub fn water_balance_scan(
    inflows: &[f64],
    scenarios: &[DemandScenario],
    capacities: &[f64],
) -> Result<Vec<WaterBalanceResult>, BalanceError> {
    if inflows.is_empty() {
        return Err(BalanceError::EmptySeries);
    }
    for s in scenarios {
        s.validate()?;
    }
    if let Some(&capacity) = capacities.iter().find(|c| !c.is_finite() || **c <= 0.0) {
        return Err(BalanceError::InvalidCapacity { capacity });
    }

    let pairs: Vec<(&DemandScenario, f64)> = scenarios
        .iter()
        .flat_map(|s| capacities.iter().map(move |&c| (s, c)))
        .collect();

    let results = pairs
        .par_iter()
        .map(|&(scenario, tank_l)| {
            let out = simulate_tank(inflows, tank_l, scenario.demand_l_day())?;
            Ok(WaterBalanceResult {
                scenario: scenario.name().to_string(),
                demand_l_day: scenario.demand_l_day(),
                tank_l,
                reliability_pct: out.reliability_pct,
                shortage_days: out.shortage_days,
                max_consec_shortage: out.max_consec_shortage,
                total_overflow_l: out.total_overflow_l,
            })
        })
        .collect::<Result<Vec<_>, BalanceError>>()?;

    info!(runs = results.len(), "water-balance scan complete");
    Ok(results)
}
