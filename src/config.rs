use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Cistern configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CisternConfig {
    /// Global RNG seed.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Station label written into every rainfall row.
    #[serde(default = "default_station")]
    pub station: String,

    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Calibration table locations.
    #[serde(default)]
    pub calibration: CalibrationToml,

    /// Rainfall synthesis settings.
    #[serde(default)]
    pub generate: GenerateToml,

    /// School catchment settings.
    #[serde(default)]
    pub design: DesignToml,

    /// Per-student demand levels.
    #[serde(default = "default_demand")]
    pub demand: Vec<DemandToml>,

    /// Tank capacity grid.
    #[serde(default)]
    pub tank: TankToml,

    /// Recommendation rule.
    #[serde(default)]
    pub recommend: RecommendToml,
}

impl CisternConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }

    /// Total number of students across all classrooms, `None` on overflow.
    pub fn total_students(&self) -> Option<u32> {
        self.design.n_classes.checked_mul(self.design.students_per_class)
    }
}

impl Default for CisternConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            station: default_station(),
            io: IoToml::default(),
            calibration: CalibrationToml::default(),
            generate: GenerateToml::default(),
            design: DesignToml::default(),
            demand: default_demand(),
            tank: TankToml::default(),
            recommend: RecommendToml::default(),
        }
    }
}

fn default_seed() -> u64 {
    2025
}
fn default_station() -> String {
    "Iloilo Roxas".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub rainfall: Option<PathBuf>,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            rainfall: None,
            format: default_format(),
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_format() -> String {
    "csv".to_string()
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    cistern_io::DEFAULT_ROWS_PER_GROUP
}

/// Calibration CSV locations. Explicit paths override the files found in `dir`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationToml {
    #[serde(default = "default_calibration_dir")]
    pub dir: PathBuf,
    pub transitions: Option<PathBuf>,
    pub gamma: Option<PathBuf>,
    pub spells: Option<PathBuf>,
}

impl Default for CalibrationToml {
    fn default() -> Self {
        Self {
            dir: default_calibration_dir(),
            transitions: None,
            gamma: None,
            spells: None,
        }
    }
}

fn default_calibration_dir() -> PathBuf {
    PathBuf::from("calibration")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateToml {
    #[serde(default = "default_n_years")]
    pub n_years: usize,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl Default for GenerateToml {
    fn default() -> Self {
        Self {
            n_years: default_n_years(),
            parallel: false,
            progress_interval: default_progress_interval(),
        }
    }
}

fn default_n_years() -> usize {
    1000
}
fn default_progress_interval() -> usize {
    50
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignToml {
    #[serde(default = "default_area_per_class")]
    pub area_per_class_m2: f64,
    #[serde(default = "default_n_classes")]
    pub n_classes: u32,
    #[serde(default = "default_students_per_class")]
    pub students_per_class: u32,
    #[serde(default = "default_runoff_coeff")]
    pub runoff_coeff: f64,
    #[serde(default = "default_gutter_eff")]
    pub gutter_eff: f64,
    #[serde(default = "default_first_flush")]
    pub first_flush_mm: f64,
}

impl Default for DesignToml {
    fn default() -> Self {
        Self {
            area_per_class_m2: default_area_per_class(),
            n_classes: default_n_classes(),
            students_per_class: default_students_per_class(),
            runoff_coeff: default_runoff_coeff(),
            gutter_eff: default_gutter_eff(),
            first_flush_mm: default_first_flush(),
        }
    }
}

fn default_area_per_class() -> f64 {
    63.0
}
fn default_n_classes() -> u32 {
    4
}
fn default_students_per_class() -> u32 {
    40
}
fn default_runoff_coeff() -> f64 {
    0.90
}
fn default_gutter_eff() -> f64 {
    0.95
}
fn default_first_flush() -> f64 {
    2.0
}

/// One demand scenario, in litres per student per day.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemandToml {
    pub name: String,
    pub litres_per_student: f64,
}

fn default_demand() -> Vec<DemandToml> {
    cistern_balance::DEFAULT_DEMAND_LEVELS
        .iter()
        .map(|&(name, lps)| DemandToml {
            name: name.to_string(),
            litres_per_student: lps,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TankToml {
    #[serde(default = "default_tank_min")]
    pub min_l: f64,
    #[serde(default = "default_tank_max")]
    pub max_l: f64,
    #[serde(default = "default_tank_step")]
    pub step_l: f64,
}

impl Default for TankToml {
    fn default() -> Self {
        Self {
            min_l: default_tank_min(),
            max_l: default_tank_max(),
            step_l: default_tank_step(),
        }
    }
}

fn default_tank_min() -> f64 {
    500.0
}
fn default_tank_max() -> f64 {
    20_000.0
}
fn default_tank_step() -> f64 {
    500.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendToml {
    #[serde(default = "default_recommend_scenario")]
    pub scenario: String,
    #[serde(default = "default_reliability_target")]
    pub reliability_target: f64,
}

impl Default for RecommendToml {
    fn default() -> Self {
        Self {
            scenario: default_recommend_scenario(),
            reliability_target: default_reliability_target(),
        }
    }
}

fn default_recommend_scenario() -> String {
    cistern_balance::DEFAULT_RECOMMEND_SCENARIO.to_string()
}
fn default_reliability_target() -> f64 {
    cistern_balance::DEFAULT_RELIABILITY_TARGET
}
