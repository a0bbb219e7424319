//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - expands the parameter product into run specs
//! - runs the load/normalize/fit/export pipeline per spec
//! - prints the rendered tables and export paths

use clap::Parser;

use crate::cli::{Command, RunArgs, ShowArgs};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `simreg` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let outputs = pipeline::run_batch(&config)?;

    for output in &outputs {
        println!("{}", output.table.as_text());
        println!(
            "Wrote {} and {}\n",
            output.json_path.display(),
            output.text_path.display()
        );
    }
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let table = crate::io::export::read_table_json(&args.table)?;
    println!("{}", table.as_text());
    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    if args.models.is_empty() || args.modes.is_empty() || args.out_vars.is_empty() || args.out_logs.is_empty()
    {
        return Err(AppError::new(
            2,
            "At least one model, mode, out-var, and log transform is required.",
        ));
    }

    Ok(RunConfig {
        models: args.models.clone(),
        slice: args.slice.clone(),
        modes: args.modes.clone(),
        out_vars: args.out_vars.clone(),
        out_logs: args.out_logs.clone(),
        data_dir: args.data_dir.clone(),
        table_dir: args.table_dir.clone(),
        text_dir: args.text_dir.clone(),
        per_var: args.per_var,
        parallel: args.parallel && !args.no_parallel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn default_batch_matches_the_standard_run() {
        let cli = crate::cli::Cli::parse_from(["simreg", "run"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        let config = run_config_from_args(&args).unwrap();

        assert_eq!(config.models, ["3xg"]);
        assert_eq!(config.slice, "team_is_nbhd");
        assert_eq!(config.modes, [crate::domain::Mode::FixedByFnSubtype]);
        assert_eq!(config.out_vars, ["team_productivity"]);
        assert_eq!(config.out_logs, [crate::domain::OutLog::Log10]);
        assert!(config.parallel);
        assert!(!config.per_var);
    }

    #[test]
    fn no_parallel_wins_over_the_default() {
        let cli = crate::cli::Cli::parse_from(["simreg", "run", "--no-parallel"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        let config = run_config_from_args(&args).unwrap();
        assert!(!config.parallel);
    }

    #[test]
    fn repeatable_flags_widen_the_product() {
        let cli = crate::cli::Cli::parse_from([
            "simreg",
            "run",
            "-m",
            "3xx",
            "-m",
            "3xg",
            "--log",
            "linear",
            "--log",
            "log10",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        let config = run_config_from_args(&args).unwrap();
        assert_eq!(config.models, ["3xx", "3xg"]);
        assert_eq!(config.out_logs.len(), 2);
    }
}
