//! Formula-to-matrix resolution.
//!
//! Given a formula and a frame, build the response vector and design matrix:
//!
//! - an intercept column comes first (named `Intercept`)
//! - numeric terms become single columns with their transform applied
//! - categorical columns expand into treatment-coded dummies named
//!   `col[T.level]`, with the first sorted level as the reference
//! - rows with any non-finite value in the response or design row are dropped,
//!   and the dropped count is reported alongside the matrices
//!
//! Dropping (rather than erroring on) non-finite rows matters: log transforms
//! of normalized, zero-centered outputs produce NaN for the negative half of
//! the column, and those runs are simply excluded from the fit.

use nalgebra::{DMatrix, DVector};

use crate::data::frame::{Column, Frame};
use crate::error::AppError;
use crate::formula::term::{Formula, Term};

/// Resolved matrices for one formula.
#[derive(Debug, Clone)]
pub struct DesignMatrices {
    pub y: DVector<f64>,
    pub x: DMatrix<f64>,
    /// Design column names, `Intercept` first.
    pub names: Vec<String>,
    pub n_dropped: usize,
}

struct ResolvedColumn {
    name: String,
    values: Vec<f64>,
}

/// Resolve a formula against a frame.
pub fn build_matrices(formula: &Formula, frame: &Frame) -> Result<DesignMatrices, AppError> {
    let n = frame.n_rows();
    if n == 0 {
        return Err(AppError::new(3, "Dataset has no rows."));
    }

    let response = resolve_numeric_term(&formula.response, frame)?;

    let mut columns: Vec<ResolvedColumn> = Vec::new();
    for term in &formula.terms {
        let col = frame
            .column(term.column())
            .ok_or_else(|| AppError::new(3, format!("Column '{}' not found in dataset.", term.column())))?;

        match col {
            Column::Numeric(_) => columns.push(ResolvedColumn {
                name: term.to_string(),
                values: resolve_numeric_term(term, frame)?,
            }),
            Column::Categorical(values) => {
                if !matches!(term, Term::Raw(_)) {
                    return Err(AppError::new(
                        3,
                        format!("Cannot apply a log transform to categorical column '{}'.", term.column()),
                    ));
                }
                // Treatment coding: first sorted level is the reference.
                let levels = col.levels();
                for level in levels.iter().skip(1) {
                    let indicator: Vec<f64> = values
                        .iter()
                        .map(|v| if v == level { 1.0 } else { 0.0 })
                        .collect();
                    columns.push(ResolvedColumn {
                        name: format!("{}[T.{}]", term.column(), level),
                        values: indicator,
                    });
                }
            }
        }
    }

    // Row mask: keep rows where the response and every predictor are finite.
    let keep: Vec<usize> = (0..n)
        .filter(|&i| response[i].is_finite() && columns.iter().all(|c| c.values[i].is_finite()))
        .collect();
    let n_dropped = n - keep.len();

    if keep.is_empty() {
        return Err(AppError::new(
            3,
            "All rows were dropped (non-finite response or predictor values).",
        ));
    }

    let p = columns.len() + 1;
    let mut x = DMatrix::<f64>::zeros(keep.len(), p);
    let mut y = DVector::<f64>::zeros(keep.len());
    for (row, &i) in keep.iter().enumerate() {
        x[(row, 0)] = 1.0;
        for (j, col) in columns.iter().enumerate() {
            x[(row, j + 1)] = col.values[i];
        }
        y[row] = response[i];
    }

    let mut names = Vec::with_capacity(p);
    names.push("Intercept".to_string());
    names.extend(columns.into_iter().map(|c| c.name));

    Ok(DesignMatrices {
        y,
        x,
        names,
        n_dropped,
    })
}

fn resolve_numeric_term(term: &Term, frame: &Frame) -> Result<Vec<f64>, AppError> {
    let values = frame.numeric(term.column())?;
    Ok(values.iter().map(|&v| term.apply(v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::frame::Column;

    fn frame() -> Frame {
        Frame::new(vec![
            ("y".to_string(), Column::Numeric(vec![1.0, 2.0, 3.0, 4.0])),
            ("x".to_string(), Column::Numeric(vec![10.0, 20.0, 30.0, 40.0])),
            (
                "team_fn".to_string(),
                Column::Categorical(vec!["mid".into(), "low".into(), "mid".into(), "high".into()]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn intercept_first_then_terms() {
        let formula = Formula::parse("y ~ x").unwrap();
        let m = build_matrices(&formula, &frame()).unwrap();

        assert_eq!(m.names, ["Intercept", "x"]);
        assert_eq!(m.x.nrows(), 4);
        assert_eq!(m.x.ncols(), 2);
        for i in 0..4 {
            assert_eq!(m.x[(i, 0)], 1.0);
        }
        assert_eq!(m.x[(2, 1)], 30.0);
        assert_eq!(m.y[2], 3.0);
        assert_eq!(m.n_dropped, 0);
    }

    #[test]
    fn categorical_expands_to_treatment_dummies() {
        let formula = Formula::parse("y ~ team_fn").unwrap();
        let m = build_matrices(&formula, &frame()).unwrap();

        // Sorted levels: high < low < mid; "high" is the reference.
        assert_eq!(m.names, ["Intercept", "team_fn[T.low]", "team_fn[T.mid]"]);

        // Row 0 is "mid": low=0, mid=1.
        assert_eq!(m.x[(0, 1)], 0.0);
        assert_eq!(m.x[(0, 2)], 1.0);
        // Row 3 is "high" (reference): both dummies zero.
        assert_eq!(m.x[(3, 1)], 0.0);
        assert_eq!(m.x[(3, 2)], 0.0);
    }

    #[test]
    fn transform_is_applied_to_numeric_terms() {
        let formula = Formula::parse("y ~ log1p(x)").unwrap();
        let m = build_matrices(&formula, &frame()).unwrap();
        assert!((m.x[(0, 1)] - 11.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn non_finite_rows_are_dropped_and_counted() {
        let frame = Frame::new(vec![
            ("y".to_string(), Column::Numeric(vec![-1.0, 10.0, 100.0])),
            ("x".to_string(), Column::Numeric(vec![1.0, 2.0, 3.0])),
        ])
        .unwrap();

        // log10(-1) is NaN, so the first row drops.
        let formula = Formula::parse("log10(y) ~ x").unwrap();
        let m = build_matrices(&formula, &frame).unwrap();
        assert_eq!(m.n_dropped, 1);
        assert_eq!(m.x.nrows(), 2);
        assert!((m.y[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_column_is_a_dataset_error() {
        let formula = Formula::parse("y ~ nope").unwrap();
        let err = build_matrices(&formula, &frame()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn transform_on_categorical_is_rejected() {
        let formula = Formula::parse("y ~ log10(team_fn)").unwrap();
        let err = build_matrices(&formula, &frame()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
