//! The per-run regression pipeline.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> normalize -> build formulas -> fit -> table -> export
//!
//! `run_batch` expands the configured parameter product and executes the
//! pipeline once per combination; each stage prints a timing update so long
//! batches stay observable from the terminal.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;

use crate::data::normalize::normalize_frame;
use crate::domain::{RunConfig, RunSpec};
use crate::error::AppError;
use crate::fit::fitter::fit_all;
use crate::formula::builder::{per_variable_formulas, select_formula};
use crate::io::export::{write_table_json, write_table_text};
use crate::io::ingest::load_frame;
use crate::io::paths::{dataset_path, table_json_path, table_text_path};
use crate::report::table::{SummaryTable, TableMeta};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub spec: RunSpec,
    pub table: SummaryTable,
    pub json_path: PathBuf,
    pub text_path: PathBuf,
}

/// Execute the pipeline for every combination of the configured parameters.
pub fn run_batch(config: &RunConfig) -> Result<Vec<RunOutput>, AppError> {
    let mut outputs = Vec::new();
    for model in &config.models {
        for &mode in &config.modes {
            for out_var in &config.out_vars {
                for &out_log in &config.out_logs {
                    let spec = RunSpec {
                        model: model.clone(),
                        slice: config.slice.clone(),
                        mode,
                        out_var: out_var.clone(),
                        out_log,
                    };
                    outputs.push(run_one(&spec, config)?);
                }
            }
        }
    }
    Ok(outputs)
}

/// Execute the full pipeline for one run spec.
pub fn run_one(spec: &RunSpec, config: &RunConfig) -> Result<RunOutput, AppError> {
    let mut timer = StageTimer::begin(format!(
        "model {} / {} / {} / {}({})",
        spec.model,
        spec.slice,
        spec.mode,
        spec.out_log,
        spec.out_var
    ));

    let dataset = dataset_path(&config.data_dir, &spec.model, &spec.slice);
    let mut frame = load_frame(&dataset)?;
    timer.update(&format!(
        "data loaded ({} rows, {} columns)",
        frame.n_rows(),
        frame.n_cols()
    ));

    normalize_frame(&mut frame, &spec.out_var, spec.out_log)?;
    timer.update("columns normalized");

    let formulas = if config.per_var {
        per_variable_formulas(spec.mode, &spec.out_var, spec.out_log)
    } else {
        vec![select_formula(spec.mode, &spec.out_var, spec.out_log)]
    };
    timer.update(&format!("{} formula(s) constructed", formulas.len()));

    let models = fit_all(&formulas, &frame, config.parallel)?;
    timer.update(&format!("{} model(s) fit", models.len()));

    let table = SummaryTable::from_models(TableMeta::from_spec(spec), models);
    let json_path = table_json_path(&config.table_dir, spec);
    let text_path = table_text_path(&config.text_dir, spec);
    write_table_json(&json_path, &table)?;
    write_table_text(&text_path, &table)?;
    timer.end("tables exported");

    Ok(RunOutput {
        spec: spec.clone(),
        table,
        json_path,
        text_path,
    })
}

/// Per-stage progress printer for one run.
struct StageTimer {
    label: String,
    start: Instant,
    last: Instant,
}

impl StageTimer {
    fn begin(label: String) -> StageTimer {
        println!(
            "[{label}] started {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        let now = Instant::now();
        StageTimer {
            label,
            start: now,
            last: now,
        }
    }

    fn update(&mut self, message: &str) {
        let now = Instant::now();
        println!(
            "[{}] {message} (+{:.2}s, {:.2}s total)",
            self.label,
            now.duration_since(self.last).as_secs_f64(),
            now.duration_since(self.start).as_secs_f64()
        );
        self.last = now;
    }

    fn end(&mut self, message: &str) {
        self.update(message);
        println!(
            "[{}] finished ({:.2}s total)",
            self.label,
            self.start.elapsed().as_secs_f64()
        );
    }
}
