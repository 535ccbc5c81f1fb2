//! Rooftop rainwater harvest and storage-tank water balance.
//!
//! # Pipeline
//!
//! ```text
//!  ┌────────────┐     ┌────────────┐     ┌──────────────┐     ┌─────────────┐
//!  │  harvest   │────▶│    tank    │────▶│     scan     │────▶│  recommend  │
//!  │ (L per day)│     │ (one run)  │     │ (scen × tank)│     │ (min tank)  │
//!  └─────┬──────┘     └────────────┘     └──────────────┘     └─────────────┘
//!        │
//!  ┌─────▼──────┐
//!  │  summary   │
//!  │ (by month) │
//!  └────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use cistern_balance::{DemandScenario, recommend_tank, water_balance_scan};
//!
//! // Ten litres flow in every day; the school draws eight.
//! let inflows = vec![10.0; 365];
//! let scenarios = vec![DemandScenario::new("Baseline", 8.0)];
//! let results = water_balance_scan(&inflows, &scenarios, &[50.0, 100.0]).unwrap();
//!
//! let rec = recommend_tank(&results, "Baseline", 90.0).unwrap();
//! assert_eq!(rec.tank_l, 50.0);
//! ```

pub mod error;
pub mod harvest;
pub mod recommend;
pub mod scan;
pub mod summary;
pub mod tank;

pub use error::BalanceError;
pub use harvest::{CatchmentConfig, HarvestRecord, compute_harvest, harvest_litres, inflows};
pub use recommend::{
    DEFAULT_RECOMMEND_SCENARIO, DEFAULT_RELIABILITY_TARGET, Recommendation, recommend_tank,
};
pub use scan::{
    DEFAULT_DEMAND_LEVELS, DemandScenario, MAX_TANK_GRID_POINTS, TankGrid, WaterBalanceResult,
    default_scenarios, water_balance_scan,
};
pub use summary::{MonthlyStats, monthly_summary};
pub use tank::{TankOutcome, TankState, simulate_tank};
