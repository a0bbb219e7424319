//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON alongside the text tables
//! - reloaded later for re-rendering or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which covariates are always included in a formula, beyond the base terms.
///
/// The base terms themselves depend on the output variable (see
/// `formula::base_terms`); the mode only adds team-function controls on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// No extra controls; base terms plus the topology catalog only.
    #[value(name = "base")]
    Base,
    /// Control for the categorical team function at the subtype level.
    #[value(name = "fixed_by_fn_subtype")]
    FixedByFnSubtype,
    /// Control for the categorical team function type.
    #[value(name = "fixed_by_fn_type")]
    FixedByFnType,
    /// Control for the three numeric function metrics
    /// (alignment, interdependence, difficulty).
    #[value(name = "metrics")]
    Metrics,
}

impl Mode {
    /// Stable label used in export file names.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Base => "base",
            Mode::FixedByFnSubtype => "fixed_by_fn_subtype",
            Mode::FixedByFnType => "fixed_by_fn_type",
            Mode::Metrics => "metrics",
        }
    }

    /// Extra always-included covariate columns for this mode.
    pub fn covariates(self) -> &'static [&'static str] {
        match self {
            Mode::Base => &[],
            Mode::FixedByFnSubtype => &["team_fn"],
            Mode::FixedByFnType => &["team_fn_type"],
            Mode::Metrics => &[
                "team_fn_alignment",
                "team_fn_interdep",
                "team_fn_difficulty",
            ],
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Transform applied to the output variable in the response expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutLog {
    /// Fit the raw output variable.
    Linear,
    /// Fit `log10(out_var)` after normalization.
    Log10,
    /// Fit `log2(out_var)` after normalization.
    Log2,
}

impl OutLog {
    /// Stable label used in export file names (`linear`, `log10`, `log2`).
    pub fn label(self) -> &'static str {
        match self {
            OutLog::Linear => "linear",
            OutLog::Log10 => "log10",
            OutLog::Log2 => "log2",
        }
    }

    /// Whether the output column is rescaled before fitting.
    pub fn is_log(self) -> bool {
        !matches!(self, OutLog::Linear)
    }
}

impl std::fmt::Display for OutLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One parameter combination of the batch: which dataset to load and which
/// regression to run on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSpec {
    /// Simulation model id (e.g. `3xg`).
    pub model: String,
    /// Data-slice name (e.g. `team_is_nbhd`).
    pub slice: String,
    pub mode: Mode,
    /// Output variable column (e.g. `team_productivity`).
    pub out_var: String,
    pub out_log: OutLog,
}

/// A full batch configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub models: Vec<String>,
    pub slice: String,
    pub modes: Vec<Mode>,
    pub out_vars: Vec<String>,
    pub out_logs: Vec<OutLog>,

    /// Directory holding `model{model}_{slice}.csv` datasets.
    pub data_dir: PathBuf,
    /// Directory for machine-readable (JSON) tables.
    pub table_dir: PathBuf,
    /// Directory for human-readable (text) tables.
    pub text_dir: PathBuf,

    /// Fit one single-variable model per topology regressor instead of the
    /// all-variable model.
    pub per_var: bool,
    /// Fit the formula set in parallel via rayon.
    pub parallel: bool,
}

/// One estimated regression coefficient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficient {
    /// Design-matrix column name (`Intercept`, `run_step`, `team_fn[T.x]`, ...).
    pub name: String,
    pub estimate: f64,
    /// HC2 heteroscedasticity-robust standard error.
    pub std_err: f64,
    pub z_value: f64,
    /// Two-sided normal-tail p-value.
    pub p_value: f64,
}

/// Fit quality diagnostics for a single model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    /// Rows used in the fit (after non-finite rows were dropped).
    pub n_used: usize,
    /// Rows dropped because of non-finite response or predictor values.
    pub n_dropped: usize,
    /// Number of design-matrix columns, intercept included.
    pub k: usize,
    pub r_squared: f64,
    pub r_squared_adj: f64,
}

/// Fit output for a single formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedModel {
    /// The formula this model was fit from, in canonical text form.
    pub formula: String,
    pub coefficients: Vec<Coefficient>,
    pub quality: FitQuality,
}

impl FittedModel {
    pub fn coefficient(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }
}
