//! Command-line parsing for the regression runner.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code. Defaults reproduce the
//! standard batch (model `3xg`, slice `team_is_nbhd`, subtype-fixed mode,
//! log10 productivity); repeatable flags widen the parameter product.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{Mode, OutLog};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "simreg", version, about = "OLS regressions over simulation-output tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the regression batch: fit every parameter combination and export
    /// the summary tables.
    Run(RunArgs),
    /// Render a previously exported JSON table as text.
    Show(ShowArgs),
}

/// Options for the regression batch.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Simulation model id (repeatable).
    #[arg(short = 'm', long = "model", default_values_t = ["3xg".to_string()])]
    pub models: Vec<String>,

    /// Data-slice name.
    #[arg(long, default_value = "team_is_nbhd")]
    pub slice: String,

    /// Covariate mode (repeatable).
    #[arg(long = "mode", value_enum, default_values_t = [Mode::FixedByFnSubtype])]
    pub modes: Vec<Mode>,

    /// Output variable (repeatable).
    #[arg(long = "out-var", default_values_t = ["team_productivity".to_string()])]
    pub out_vars: Vec<String>,

    /// Output transform (repeatable).
    #[arg(long = "log", value_enum, default_values_t = [OutLog::Log10])]
    pub out_logs: Vec<OutLog>,

    /// Directory holding `model{model}_{slice}.csv` datasets.
    #[arg(long, default_value = "data/sets")]
    pub data_dir: PathBuf,

    /// Directory for JSON table exports.
    #[arg(long, default_value = "data/regression")]
    pub table_dir: PathBuf,

    /// Directory for text table exports.
    #[arg(long, default_value = "figures/regression")]
    pub text_dir: PathBuf,

    /// Fit one single-variable model per topology regressor instead of the
    /// all-variable model.
    #[arg(long)]
    pub per_var: bool,

    /// Fit the formula set in parallel (enabled by default).
    #[arg(long, default_value_t = true)]
    pub parallel: bool,

    /// Disable parallel fitting.
    #[arg(long)]
    pub no_parallel: bool,
}

/// Options for rendering a saved table.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Table JSON file produced by `simreg run`.
    #[arg(long, value_name = "JSON")]
    pub table: PathBuf,
}
