//! Spell-length fits and their three-tier lookup.

use std::fmt;
use std::str::FromStr;

use crate::error::CalibrationError;
use crate::month_key::MonthKey;

/// Lower bound applied to a geometric parameter before sampling.
pub const MIN_GEOM_P: f64 = 1e-6;

/// Wet or dry. Doubles as the state of the occurrence process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SpellKind {
    /// No rain.
    Dry = 0,
    /// Rain.
    Wet = 1,
}

impl SpellKind {
    /// Returns the opposite state.
    pub fn flip(self) -> Self {
        match self {
            Self::Dry => Self::Wet,
            Self::Wet => Self::Dry,
        }
    }

    /// Returns the 0/1 flag used in tabular output.
    pub fn as_flag(self) -> u8 {
        self as u8
    }

    /// Returns `Wet` for `true`.
    pub fn from_wet(wet: bool) -> Self {
        if wet { Self::Wet } else { Self::Dry }
    }

    /// Returns the lowercase name (`"wet"` / `"dry"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dry => "dry",
            Self::Wet => "wet",
        }
    }
}

impl FromStr for SpellKind {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "wet" => Ok(Self::Wet),
            "dry" => Ok(Self::Dry),
            other => Err(CalibrationError::UnknownSpellKind {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SpellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the spell-fit table.
///
/// Parameters are optional; a row normally carries either `geom_p` or the
/// `(nb_r, nb_p)` pair. NaN is treated like a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellFit {
    /// Month the fit applies to.
    pub month: MonthKey,
    /// Spell type the fit applies to.
    pub kind: SpellKind,
    /// Geometric success probability.
    pub geom_p: Option<f64>,
    /// Negative-binomial size.
    pub nb_r: Option<f64>,
    /// Negative-binomial success probability.
    pub nb_p: Option<f64>,
}

/// How a [`SpellFit`] should be sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpellParams {
    /// Geometric with `p` already clamped to `[1e-6, 1]`.
    Geometric {
        /// Success probability.
        p: f64,
    },
    /// Negative binomial with a whole-number size.
    NegBinomial {
        /// Number of successes.
        r: u64,
        /// Success probability in (0, 1].
        p: f64,
    },
    /// Non-integer size: Poisson with a Gamma(r, (1-p)/p) rate.
    GammaPoisson {
        /// Gamma shape.
        r: f64,
        /// Success probability in (0, 1].
        p: f64,
    },
    /// Nothing usable; callers fall back.
    Unusable,
}

impl SpellFit {
    /// A row with only a geometric parameter.
    pub fn geometric(month: MonthKey, kind: SpellKind, p: f64) -> Self {
        Self {
            month,
            kind,
            geom_p: Some(p),
            nb_r: None,
            nb_p: None,
        }
    }

    /// A row with only a negative-binomial pair.
    pub fn negative_binomial(month: MonthKey, kind: SpellKind, r: f64, p: f64) -> Self {
        Self {
            month,
            kind,
            geom_p: None,
            nb_r: Some(r),
            nb_p: Some(p),
        }
    }

    /// Classifies the row's parameters.
    ///
    /// A present, non-NaN `geom_p` always wins (infinities clamp to the
    /// bounds). Otherwise the negative-binomial pair must be finite with
    /// `r > 0` and `0 < p <= 1`.
    pub fn params(&self) -> SpellParams {
        if let Some(p) = self.geom_p
            && !p.is_nan()
        {
            return SpellParams::Geometric {
                p: p.clamp(MIN_GEOM_P, 1.0),
            };
        }
        let (Some(r), Some(p)) = (self.nb_r, self.nb_p) else {
            return SpellParams::Unusable;
        };
        if !r.is_finite() || !p.is_finite() || r <= 0.0 || p <= 0.0 || p > 1.0 {
            return SpellParams::Unusable;
        }
        if r.fract() == 0.0 && r <= u64::MAX as f64 {
            SpellParams::NegBinomial { r: r as u64, p }
        } else {
            SpellParams::GammaPoisson { r, p }
        }
    }
}

/// Outcome of a spell-fit lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitResolution<'a> {
    /// A row for the requested month.
    Exact(&'a SpellFit),
    /// The `all` row for the requested spell type.
    Wildcard(&'a SpellFit),
    /// No row applies.
    NoFit,
}

impl<'a> FitResolution<'a> {
    /// Returns the resolved row, if any.
    pub fn fit(self) -> Option<&'a SpellFit> {
        match self {
            Self::Exact(f) | Self::Wildcard(f) => Some(f),
            Self::NoFit => None,
        }
    }
}

/// Spell-length fits for both spell types and every month.
#[derive(Debug, Clone, Default)]
pub struct SpellFitTable {
    rows: Vec<SpellFit>,
}

impl SpellFitTable {
    /// Wraps a list of rows. Row order matters: the first matching row wins.
    pub fn new(rows: Vec<SpellFit>) -> Self {
        Self { rows }
    }

    /// Returns all rows.
    pub fn rows(&self) -> &[SpellFit] {
        &self.rows
    }

    /// Returns `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves the fit for `month` and `kind`.
    ///
    /// Tiers, in order:
    /// 1. a row keyed by the numeric month, then one keyed by its decimal text;
    /// 2. the `all` wildcard row;
    /// 3. [`FitResolution::NoFit`].
    pub fn resolve(&self, month: u8, kind: SpellKind) -> FitResolution<'_> {
        let of_kind = || self.rows.iter().filter(move |r| r.kind == kind);

        if let Some(fit) = of_kind()
            .find(|r| r.month.is_month(month))
            .or_else(|| of_kind().find(|r| r.month.is_month_text(month)))
        {
            return FitResolution::Exact(fit);
        }
        match of_kind().find(|r| r.month.is_wildcard()) {
            Some(fit) => FitResolution::Wildcard(fit),
            None => FitResolution::NoFit,
        }
    }
}
