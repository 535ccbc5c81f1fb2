//! Readers for the three calibration tables.
//!
//! Numeric cells are read leniently: blank or unparsable values become
//! missing parameters, which the samplers resolve through their fallbacks.
//! Rows with an empty month key, or spell rows of an unknown type, are
//! skipped.

use std::path::{Path, PathBuf};

use cistern_calibration::{
    Calibration, GammaFit, GammaTable, MonthKey, SpellFit, SpellFitTable, SpellKind,
    TransitionTable,
};
use tracing::{debug, info};

use crate::error::IoError;
use crate::table::{Columns, cell, open_csv, parse_optional_f64};

/// Locations of the calibration CSV files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationPaths {
    /// `month, pDW`
    pub transitions: PathBuf,
    /// `month, gamma_k, gamma_theta, gamma_mean`
    pub gamma: PathBuf,
    /// `month, type, geom_p, nb_r, nb_p`
    pub spells: PathBuf,
}

impl CalibrationPaths {
    /// The conventional file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            transitions: dir.join("transitions.csv"),
            gamma: dir.join("gamma.csv"),
            spells: dir.join("spell_fits.csv"),
        }
    }
}

/// Reads all three tables.
///
/// # Errors
///
/// Returns an error if any file is missing, unreadable, or lacks its
/// required columns.
pub fn read_calibration(paths: &CalibrationPaths) -> Result<Calibration, IoError> {
    let calibration = Calibration::new(
        read_transitions(&paths.transitions)?,
        read_gamma(&paths.gamma)?,
        read_spell_fits(&paths.spells)?,
    );
    info!(
        gamma_rows = calibration.gamma.rows().len(),
        spell_rows = calibration.spells.rows().len(),
        "calibration loaded"
    );
    Ok(calibration)
}

fn month_key(raw: &str, path: &Path, row: usize) -> Option<MonthKey> {
    match raw.parse::<MonthKey>() {
        Ok(key) => Some(key),
        Err(e) => {
            debug!(path = %path.display(), row, error = %e, "skipping row");
            None
        }
    }
}

/// Reads the wet-start probability table. Requires a `month` column; a
/// missing `pDW` column leaves every month at the default.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or has no `month`
/// column.
pub fn read_transitions(path: &Path) -> Result<TransitionTable, IoError> {
    let mut reader = open_csv(path)?;
    let columns = Columns::from_reader(&mut reader, path)?;
    let [month_idx] = columns.require(path, ["month"])?;
    let p_idx = columns.position("pDW");

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        if let Some(key) = month_key(cell(&record, Some(month_idx)), path, i + 1) {
            rows.push((key, parse_optional_f64(cell(&record, p_idx))));
        }
    }
    Ok(TransitionTable::from_rows(rows.iter().map(|(k, p)| (k, *p))))
}

/// Reads the wet-day amount table. Requires a `month` column.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or has no `month`
/// column.
pub fn read_gamma(path: &Path) -> Result<GammaTable, IoError> {
    let mut reader = open_csv(path)?;
    let columns = Columns::from_reader(&mut reader, path)?;
    let [month_idx] = columns.require(path, ["month"])?;
    let k_idx = columns.position("gamma_k");
    let theta_idx = columns.position("gamma_theta");
    let mean_idx = columns.position("gamma_mean");

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let Some(month) = month_key(cell(&record, Some(month_idx)), path, i + 1) else {
            continue;
        };
        rows.push(GammaFit {
            month,
            shape: parse_optional_f64(cell(&record, k_idx)),
            scale: parse_optional_f64(cell(&record, theta_idx)),
            mean: parse_optional_f64(cell(&record, mean_idx)),
        });
    }
    Ok(GammaTable::new(rows))
}

/// Reads the spell-length table. Requires `month` and `type` columns.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or lacks a required
/// column.
pub fn read_spell_fits(path: &Path) -> Result<SpellFitTable, IoError> {
    let mut reader = open_csv(path)?;
    let columns = Columns::from_reader(&mut reader, path)?;
    let [month_idx, type_idx] = columns.require(path, ["month", "type"])?;
    let geom_idx = columns.position("geom_p");
    let r_idx = columns.position("nb_r");
    let p_idx = columns.position("nb_p");

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let Some(month) = month_key(cell(&record, Some(month_idx)), path, i + 1) else {
            continue;
        };
        let kind = match cell(&record, Some(type_idx)).parse::<SpellKind>() {
            Ok(kind) => kind,
            Err(e) => {
                debug!(path = %path.display(), row = i + 1, error = %e, "skipping row");
                continue;
            }
        };
        rows.push(SpellFit {
            month,
            kind,
            geom_p: parse_optional_f64(cell(&record, geom_idx)),
            nb_r: parse_optional_f64(cell(&record, r_idx)),
            nb_p: parse_optional_f64(cell(&record, p_idx)),
        });
    }
    Ok(SpellFitTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn transitions_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "t.csv",
            "month,pDW\n1,0.42\n2,\n3,abc\nall,0.9\n,0.5\n",
        );
        let t = read_transitions(&path).unwrap();
        assert_eq!(t.wet_prob(1), 0.42);
        assert_eq!(t.wet_prob(2), 0.3);
        assert_eq!(t.wet_prob(3), 0.3);
    }

    #[test]
    fn transitions_without_probability_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "t.csv", "month\n1\n2\n");
        assert_eq!(read_transitions(&path).unwrap(), TransitionTable::default());
    }

    #[test]
    fn gamma_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "g.csv",
            "month,gamma_k,gamma_theta,gamma_mean\n1,0.8,12.5,10\n2,,,6.5\n",
        );
        let g = read_gamma(&path).unwrap();
        assert_eq!(g.rows().len(), 2);
        assert_eq!(g.rows()[0].shape_scale(), Some((0.8, 12.5)));
        assert_eq!(g.rows()[1].shape, None);
        assert_eq!(g.rows()[1].mean, Some(6.5));
    }

    #[test]
    fn spell_fits_skip_unknown_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "s.csv",
            "month,type,geom_p,nb_r,nb_p\n1,wet,0.5,,\n1,dry,,2,0.3\nall,dry,,1.5,0.2\n1,hail,0.1,,\n",
        );
        let s = read_spell_fits(&path).unwrap();
        assert_eq!(s.rows().len(), 3);
        assert!(s.rows()[2].month.is_wildcard());
        assert_eq!(s.rows()[1].nb_r, Some(2.0));
    }

    #[test]
    fn spell_fits_require_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "s.csv", "month,geom_p\n1,0.5\n");
        match read_spell_fits(&path).unwrap_err() {
            IoError::MissingColumns { columns, .. } => assert_eq!(columns, vec!["type"]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn missing_file() {
        let err = read_gamma(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn default_file_names() {
        let p = CalibrationPaths::in_dir(Path::new("cal"));
        assert_eq!(p.spells, Path::new("cal").join("spell_fits.csv"));
    }
}
