//! Fit formulas with HC2-robust OLS.
//!
//! One formula becomes one `FittedModel`: coefficients with robust standard
//! errors, z statistics, two-sided p-values, and fit quality. When several
//! formulas are queued (the per-variable mode), the `parallel` flag fans the
//! fits out across rayon workers; each fit is independent, so the only effect
//! is wall-clock time.

use rayon::prelude::*;

use crate::data::frame::Frame;
use crate::domain::{Coefficient, FitQuality, FittedModel};
use crate::error::AppError;
use crate::fit::matrices::build_matrices;
use crate::formula::term::Formula;
use crate::math::{fit_ols, hc2_standard_errors, two_sided_p};

/// Fit a single formula against a frame.
pub fn fit_formula(formula: &Formula, frame: &Frame) -> Result<FittedModel, AppError> {
    let m = build_matrices(formula, frame)?;

    let n = m.x.nrows();
    let k = m.x.ncols();
    if n < k + 1 {
        return Err(AppError::new(
            3,
            format!("Underdetermined fit for '{formula}': n={n} rows for k={k} regressors."),
        ));
    }

    let ols = fit_ols(&m.x, &m.y)?;
    let se = hc2_standard_errors(&m.x, &ols.residuals)?;

    let coefficients: Vec<Coefficient> = m
        .names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let estimate = ols.beta[j];
            let std_err = se[j];
            // se == 0 on an exact fit: the division yields ±inf and the
            // p-value collapses to 0, which is the right reading.
            let z_value = estimate / std_err;
            Coefficient {
                name: name.clone(),
                estimate,
                std_err,
                z_value,
                p_value: two_sided_p(z_value),
            }
        })
        .collect();

    let quality = fit_quality(&m.y, &ols.residuals, n, k, m.n_dropped);

    Ok(FittedModel {
        formula: formula.to_string(),
        coefficients,
        quality,
    })
}

/// Fit a list of formulas, optionally in parallel.
pub fn fit_all(formulas: &[Formula], frame: &Frame, parallel: bool) -> Result<Vec<FittedModel>, AppError> {
    if parallel {
        formulas
            .par_iter()
            .map(|f| fit_formula(f, frame))
            .collect()
    } else {
        formulas.iter().map(|f| fit_formula(f, frame)).collect()
    }
}

fn fit_quality(
    y: &nalgebra::DVector<f64>,
    residuals: &nalgebra::DVector<f64>,
    n: usize,
    k: usize,
    n_dropped: usize,
) -> FitQuality {
    let mean = y.iter().sum::<f64>() / n as f64;
    let sst: f64 = y.iter().map(|v| (v - mean) * (v - mean)).sum();
    let sse: f64 = residuals.iter().map(|e| e * e).sum();

    let r_squared = if sst > 0.0 { 1.0 - sse / sst } else { 0.0 };
    let r_squared_adj = if n > k {
        1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / (n as f64 - k as f64)
    } else {
        r_squared
    };

    FitQuality {
        n_used: n,
        n_dropped,
        k,
        r_squared,
        r_squared_adj,
    }
}
