//! JSON run report: parameters, headline metrics and the recommendation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use cistern_balance::{CatchmentConfig, DemandScenario, HarvestRecord, Recommendation};

use crate::config::CisternConfig;

/// Where the rainfall series came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RainfallSource {
    /// Synthesized in this run.
    Synthetic {
        seed: u64,
        n_years: usize,
        parallel: bool,
    },
    /// Read from a CSV file.
    File { path: PathBuf },
}

/// Design inputs echoed into the report.
#[derive(Debug, Clone, Serialize)]
pub struct Parameters {
    pub area_per_class_m2: f64,
    pub n_classes: u32,
    pub students_per_class: u32,
    pub runoff_coeff: f64,
    pub gutter_eff: f64,
    pub first_flush_mm: f64,
    pub tank_min_l: f64,
    pub tank_max_l: f64,
    pub tank_step_l: f64,
    pub demand: Vec<DemandEntry>,
    pub recommend_scenario: String,
    pub reliability_target_pct: f64,
}

/// One demand scenario as scanned.
#[derive(Debug, Clone, Serialize)]
pub struct DemandEntry {
    pub name: String,
    pub demand_l_day: f64,
}

impl Parameters {
    pub fn new(config: &CisternConfig, scenarios: &[DemandScenario]) -> Self {
        Self {
            area_per_class_m2: config.design.area_per_class_m2,
            n_classes: config.design.n_classes,
            students_per_class: config.design.students_per_class,
            runoff_coeff: config.design.runoff_coeff,
            gutter_eff: config.design.gutter_eff,
            first_flush_mm: config.design.first_flush_mm,
            tank_min_l: config.tank.min_l,
            tank_max_l: config.tank.max_l,
            tank_step_l: config.tank.step_l,
            demand: scenarios
                .iter()
                .map(|s| DemandEntry {
                    name: s.name().to_string(),
                    demand_l_day: s.demand_l_day(),
                })
                .collect(),
            recommend_scenario: config.recommend.scenario.clone(),
            reliability_target_pct: config.recommend.reliability_target,
        }
    }
}

/// Summary figures over the whole harvest series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    pub catchment_area_m2: f64,
    pub total_students: u32,
    pub days: usize,
    pub total_harvest_l: f64,
    pub mean_daily_harvest_l: f64,
    pub wet_days: usize,
    /// `None` when the series has no wet day.
    pub mean_wet_rain_mm: Option<f64>,
}

impl HeadlineMetrics {
    pub fn compute(
        harvest: &[HarvestRecord],
        catchment: &CatchmentConfig,
        total_students: u32,
    ) -> Self {
        let total_harvest_l: f64 = harvest.iter().map(|h| h.harvest_l).sum();
        let mean_daily_harvest_l = if harvest.is_empty() {
            0.0
        } else {
            total_harvest_l / harvest.len() as f64
        };
        let (wet_days, wet_rain) = harvest
            .iter()
            .filter(|h| h.day.wet)
            .fold((0usize, 0.0), |(n, s), h| (n + 1, s + h.day.rain_mm));
        Self {
            catchment_area_m2: catchment.catchment_area_m2(),
            total_students,
            days: harvest.len(),
            total_harvest_l,
            mean_daily_harvest_l,
            wet_days,
            mean_wet_rain_mm: (wet_days > 0).then(|| wet_rain / wet_days as f64),
        }
    }
}

/// The recommended tank, mirrored for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedTank {
    pub scenario: String,
    pub tank_l: f64,
    pub reliability_pct: f64,
    pub demand_l_day: f64,
}

impl From<&Recommendation> for RecommendedTank {
    fn from(r: &Recommendation) -> Self {
        Self {
            scenario: r.scenario.clone(),
            tank_l: r.tank_l,
            reliability_pct: r.reliability_pct,
            demand_l_day: r.demand_l_day,
        }
    }
}

/// Everything written to `report.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub station: String,
    pub rainfall: RainfallSource,
    pub parameters: Parameters,
    pub metrics: HeadlineMetrics,
    /// `None` when no scanned tank reaches the target.
    pub recommendation: Option<RecommendedTank>,
}

impl RunReport {
    /// Serializes the report as pretty-printed JSON and writes it to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize run report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "run report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cistern_synth::DailyRecord;

    use super::*;

    fn day(doy: u16, rain_mm: f64) -> DailyRecord {
        DailyRecord {
            synthetic_year: 1,
            day_of_year: doy,
            month: 1,
            day_in_month: doy as u8,
            rain_mm,
            wet: rain_mm > 0.0,
        }
    }

    fn harvest(days: &[DailyRecord]) -> Vec<HarvestRecord> {
        cistern_balance::compute_harvest(days, &CatchmentConfig::new()).unwrap()
    }

    #[test]
    fn metrics_over_short_series() {
        let h = harvest(&[day(1, 5.0), day(2, 0.0), day(3, 1.0), day(4, 0.0)]);
        let m = HeadlineMetrics::compute(&h, &CatchmentConfig::new(), 160);
        assert_eq!(m.catchment_area_m2, 252.0);
        assert_eq!(m.days, 4);
        assert_eq!(m.wet_days, 2);
        assert_eq!(m.mean_wet_rain_mm, Some(3.0));
        // Only the 5 mm day clears the 2 mm first flush.
        let expected = 3.0 * 252.0 * 0.9 * 0.95;
        assert!((m.total_harvest_l - expected).abs() < 1e-9);
        assert!((m.mean_daily_harvest_l - expected / 4.0).abs() < 1e-9);
    }

    #[test]
    fn metrics_without_wet_days() {
        let h = harvest(&[day(1, 0.0)]);
        let m = HeadlineMetrics::compute(&h, &CatchmentConfig::new(), 1);
        assert_eq!(m.wet_days, 0);
        assert_eq!(m.mean_wet_rain_mm, None);
        assert_eq!(m.total_harvest_l, 0.0);
    }

    #[test]
    fn report_json_shape() {
        let config = CisternConfig::default();
        let scenarios = vec![DemandScenario::new("Baseline", 800.0)];
        let h = harvest(&[day(1, 10.0)]);
        let report = RunReport {
            station: "S".to_string(),
            rainfall: RainfallSource::Synthetic {
                seed: 1,
                n_years: 2,
                parallel: false,
            },
            parameters: Parameters::new(&config, &scenarios),
            metrics: HeadlineMetrics::compute(&h, &CatchmentConfig::new(), 160),
            recommendation: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["rainfall"]["kind"], "synthetic");
        assert_eq!(value["parameters"]["demand"][0]["demand_l_day"], 800.0);
        assert_eq!(value["parameters"]["reliability_target_pct"], 90.0);
        assert_eq!(value["metrics"]["total_students"], 160);
        assert!(value["recommendation"].is_null());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"station\": \"S\""));
    }

    #[test]
    fn file_source_tag() {
        let src = RainfallSource::File {
            path: PathBuf::from("rain.csv"),
        };
        let value = serde_json::to_value(&src).unwrap();
        assert_eq!(value["kind"], "file");
        assert_eq!(value["path"], "rain.csv");
    }
}
