//! Tank size recommendation.

use crate::scan::WaterBalanceResult;

/// Scenario consulted when no other is named.
pub const DEFAULT_RECOMMEND_SCENARIO: &str = "Baseline";

/// Reliability, in percent, a recommended tank must reach.
pub const DEFAULT_RELIABILITY_TARGET: f64 = 90.0;

/// The smallest tank meeting the reliability target.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Scenario the recommendation was made for.
    pub scenario: String,
    /// Recommended capacity in litres.
    pub tank_l: f64,
    /// Reliability reached at that capacity.
    pub reliability_pct: f64,
    /// Daily demand of the scenario.
    pub demand_l_day: f64,
}

/// Picks the smallest scanned capacity of `scenario` whose reliability is at
/// least `target_pct`, or `None` if no capacity qualifies.
pub fn recommend_tank(
    results: &[WaterBalanceResult],
    scenario: &str,
    target_pct: f64,
) -> Option<Recommendation> {
    let mut rows: Vec<&WaterBalanceResult> =
        results.iter().filter(|r| r.scenario == scenario).collect();
    rows.sort_by(|a, b| a.tank_l.total_cmp(&b.tank_l));
    rows.into_iter()
        .find(|r| r.reliability_pct >= target_pct)
        .map(|r| Recommendation {
            scenario: r.scenario.clone(),
            tank_l: r.tank_l,
            reliability_pct: r.reliability_pct,
            demand_l_day: r.demand_l_day,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(scenario: &str, tank_l: f64, reliability_pct: f64) -> WaterBalanceResult {
        WaterBalanceResult {
            scenario: scenario.to_string(),
            demand_l_day: 800.0,
            tank_l,
            reliability_pct,
            shortage_days: 0,
            max_consec_shortage: 0,
            total_overflow_l: 0.0,
        }
    }

    #[test]
    fn smallest_tank_crossing_target() {
        let results = vec![
            row("Baseline", 4500.0, 87.0),
            row("Baseline", 5000.0, 89.0),
            row("Baseline", 5500.0, 91.0),
            row("Baseline", 6000.0, 93.0),
        ];
        let rec = recommend_tank(&results, DEFAULT_RECOMMEND_SCENARIO, 90.0).unwrap();
        assert_eq!(rec.tank_l, 5500.0);
        assert_eq!(rec.reliability_pct, 91.0);
    }

    #[test]
    fn target_is_inclusive() {
        let results = vec![row("Baseline", 1000.0, 90.0)];
        assert_eq!(
            recommend_tank(&results, "Baseline", DEFAULT_RELIABILITY_TARGET)
                .unwrap()
                .tank_l,
            1000.0
        );
    }

    #[test]
    fn other_scenarios_ignored() {
        let results = vec![row("Low", 500.0, 99.0), row("Baseline", 500.0, 50.0)];
        assert_eq!(recommend_tank(&results, "Baseline", 90.0), None);
    }

    #[test]
    fn unsorted_input_scanned_ascending() {
        let results = vec![row("Baseline", 8000.0, 95.0), row("Baseline", 6000.0, 92.0)];
        assert_eq!(recommend_tank(&results, "Baseline", 90.0).unwrap().tank_l, 6000.0);
    }
}
