//! Summary-table assembly and text rendering.
//!
//! One table aggregates one or more fitted models side by side. The regressor
//! order is canonical: intercept, run-step terms, team size, then the fixed
//! topology catalog; whatever regressors remain (mode covariates, categorical
//! dummies) follow in first-appearance order. Cells carry the coefficient with
//! significance stars over the robust standard error in parentheses.
//!
//! The struct serializes to JSON as the machine-readable artifact; `as_text`
//! renders the human-readable one. Text rendering lives here so output changes
//! stay localized.

use serde::{Deserialize, Serialize};

use crate::domain::{FittedModel, Mode, OutLog, RunSpec};
use crate::formula::builder::response_term;
use crate::formula::vars::GRAPH_VARS;
use crate::math::significance_stars;

/// Run identification carried alongside the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMeta {
    pub model: String,
    pub slice: String,
    pub mode: Mode,
    pub out_var: String,
    pub out_log: OutLog,
}

impl TableMeta {
    pub fn from_spec(spec: &RunSpec) -> TableMeta {
        TableMeta {
            model: spec.model.clone(),
            slice: spec.slice.clone(),
            mode: spec.mode,
            out_var: spec.out_var.clone(),
            out_log: spec.out_log,
        }
    }
}

/// An ordered, labeled aggregation of fitted models; the unit persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryTable {
    pub meta: TableMeta,
    /// Column headings, `1`..`n` in fit order.
    pub model_names: Vec<String>,
    /// Resolved regressor order for rendering.
    pub regressor_order: Vec<String>,
    pub models: Vec<FittedModel>,
}

impl SummaryTable {
    pub fn from_models(meta: TableMeta, models: Vec<FittedModel>) -> SummaryTable {
        let model_names = (1..=models.len()).map(|i| i.to_string()).collect();
        let regressor_order = regressor_order(&models);
        SummaryTable {
            meta,
            model_names,
            regressor_order,
            models,
        }
    }

    /// Render the table in the plain-text form written to disk.
    pub fn as_text(&self) -> String {
        let response = response_term(&self.meta.out_var, self.meta.out_log);

        let name_width = self
            .regressor_order
            .iter()
            .map(|n| n.len())
            .chain(std::iter::once("R-squared Adj.".len()))
            .max()
            .unwrap_or(12);
        let cell_width = 15usize;
        let total = name_width + (cell_width + 1) * self.model_names.len();

        let mut out = String::new();
        out.push_str(&format!(
            "OLS (HC2) | model {} | slice {} | mode {} | {}\n",
            self.meta.model, self.meta.slice, self.meta.mode, response
        ));
        out.push_str(&"=".repeat(total));
        out.push('\n');

        out.push_str(&format!("{:<name_width$}", ""));
        for name in &self.model_names {
            out.push_str(&format!(" {name:>cell_width$}"));
        }
        out.push('\n');
        out.push_str(&"-".repeat(total));
        out.push('\n');

        for regressor in &self.regressor_order {
            let mut est_line = format!("{regressor:<name_width$}");
            let mut se_line = format!("{:<name_width$}", "");
            for model in &self.models {
                match model.coefficient(regressor) {
                    Some(c) => {
                        let est = format!("{:.4}{}", c.estimate, significance_stars(c.p_value));
                        let se = format!("({:.4})", c.std_err);
                        est_line.push_str(&format!(" {est:>cell_width$}"));
                        se_line.push_str(&format!(" {se:>cell_width$}"));
                    }
                    None => {
                        est_line.push_str(&format!(" {:>cell_width$}", ""));
                        se_line.push_str(&format!(" {:>cell_width$}", ""));
                    }
                }
            }
            out.push_str(est_line.trim_end());
            out.push('\n');
            if !se_line.trim().is_empty() {
                out.push_str(se_line.trim_end());
                out.push('\n');
            }
        }

        out.push_str(&"-".repeat(total));
        out.push('\n');
        self.push_footer_row(&mut out, "N", name_width, cell_width, |m| {
            format!("{}", m.quality.n_used)
        });
        self.push_footer_row(&mut out, "R-squared", name_width, cell_width, |m| {
            format!("{:.4}", m.quality.r_squared)
        });
        self.push_footer_row(&mut out, "R-squared Adj.", name_width, cell_width, |m| {
            format!("{:.4}", m.quality.r_squared_adj)
        });
        out.push_str(&"=".repeat(total));
        out.push('\n');
        out.push_str("Standard errors in parentheses.\n");
        out.push_str("* p<.1, ** p<.05, *** p<.01\n");

        out
    }

    fn push_footer_row(
        &self,
        out: &mut String,
        label: &str,
        name_width: usize,
        cell_width: usize,
        value: impl Fn(&FittedModel) -> String,
    ) {
        let mut line = format!("{label:<name_width$}");
        for model in &self.models {
            line.push_str(&format!(" {:>cell_width$}", value(model)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

/// Canonical regressor order across a set of models.
///
/// Base terms and the topology catalog come first (filtered to the regressors
/// actually present); everything else follows in first-appearance order.
pub fn regressor_order(models: &[FittedModel]) -> Vec<String> {
    let canonical: Vec<&str> = ["Intercept", "run_step", "log1p(run_step)", "team_size"]
        .into_iter()
        .chain(GRAPH_VARS)
        .collect();

    let present = |name: &str| models.iter().any(|m| m.coefficient(name).is_some());

    let mut order: Vec<String> = canonical
        .iter()
        .filter(|name| present(name))
        .map(|name| name.to_string())
        .collect();

    for model in models {
        for c in &model.coefficients {
            if !order.contains(&c.name) {
                order.push(c.name.clone());
            }
        }
    }

    order
}
