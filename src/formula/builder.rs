//! Mode-conditioned formula building.
//!
//! Rules:
//!
//! - `team_productivity` outputs use `log1p(run_step)` as the lone base term;
//!   every other output uses raw `run_step` plus `team_size`.
//! - The mode appends its team-function controls (see `Mode::covariates`).
//! - The full topology catalog is appended unconditionally.
//!
//! The default product is a single all-variable formula; `per_variable_formulas`
//! instead emits one small model per catalog variable so the exported table can
//! show the twelve single-variable fits side by side.

use crate::domain::{Mode, OutLog};
use crate::formula::term::{Formula, Term};
use crate::formula::vars::GRAPH_VARS;

/// Base terms conditioned on the output variable.
pub fn base_terms(out_var: &str) -> Vec<Term> {
    if out_var == "team_productivity" {
        vec![Term::Log1p("run_step".to_string())]
    } else {
        vec![
            Term::Raw("run_step".to_string()),
            Term::Raw("team_size".to_string()),
        ]
    }
}

/// The response expression for an output variable and transform.
pub fn response_term(out_var: &str, out_log: OutLog) -> Term {
    match out_log {
        OutLog::Linear => Term::Raw(out_var.to_string()),
        OutLog::Log10 => Term::Log10(out_var.to_string()),
        OutLog::Log2 => Term::Log2(out_var.to_string()),
    }
}

fn always_terms(mode: Mode, out_var: &str) -> Vec<Term> {
    let mut terms = base_terms(out_var);
    for cov in mode.covariates() {
        terms.push(Term::Raw(cov.to_string()));
    }
    terms
}

/// Build the all-variable formula for one run: always-included terms plus the
/// full topology catalog.
pub fn select_formula(mode: Mode, out_var: &str, out_log: OutLog) -> Formula {
    let mut terms = always_terms(mode, out_var);
    for var in GRAPH_VARS {
        terms.push(Term::Raw(var.to_string()));
    }
    Formula {
        response: response_term(out_var, out_log),
        terms,
    }
}

/// Build one single-variable formula per catalog entry: always-included terms
/// plus exactly one topology variable each.
pub fn per_variable_formulas(mode: Mode, out_var: &str, out_log: OutLog) -> Vec<Formula> {
    GRAPH_VARS
        .iter()
        .map(|var| {
            let mut terms = always_terms(mode, out_var);
            terms.push(Term::Raw(var.to_string()));
            Formula {
                response: response_term(out_var, out_log),
                terms,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn productivity_output_uses_log1p_run_step_only() {
        let terms = base_terms("team_productivity");
        assert_eq!(terms, vec![Term::Log1p("run_step".to_string())]);

        let terms = base_terms("team_performance");
        assert_eq!(
            terms,
            vec![
                Term::Raw("run_step".to_string()),
                Term::Raw("team_size".to_string())
            ]
        );
    }

    #[test]
    fn formula_starts_with_response_and_ends_with_catalog() {
        let formula = select_formula(Mode::FixedByFnSubtype, "team_productivity", OutLog::Log10);
        let text = formula.to_string();

        assert!(text.starts_with("log10(team_productivity) ~ "));

        let tail: String = GRAPH_VARS.join(" + ");
        assert!(text.ends_with(&tail), "formula does not end with the catalog: {text}");
    }

    #[test]
    fn mode_covariates_sit_between_base_and_catalog() {
        let formula = select_formula(Mode::Metrics, "team_performance", OutLog::Linear);
        let names: Vec<String> = formula.terms.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            &names[..5],
            &[
                "run_step",
                "team_size",
                "team_fn_alignment",
                "team_fn_interdep",
                "team_fn_difficulty"
            ]
        );
        assert_eq!(names.len(), 5 + GRAPH_VARS.len());
    }

    #[test]
    fn base_mode_appends_nothing() {
        let formula = select_formula(Mode::Base, "team_performance", OutLog::Linear);
        assert_eq!(formula.terms.len(), 2 + GRAPH_VARS.len());
    }

    #[test]
    fn per_variable_formulas_cover_the_catalog() {
        let formulas = per_variable_formulas(Mode::Base, "team_performance", OutLog::Linear);
        assert_eq!(formulas.len(), GRAPH_VARS.len());
        for (formula, var) in formulas.iter().zip(GRAPH_VARS) {
            let last = formula.terms.last().unwrap();
            assert_eq!(last.column(), var);
        }
    }
}
