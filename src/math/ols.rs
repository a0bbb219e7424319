//! OLS solver and HC2 robust covariance.
//!
//! Each regression run solves one linear least squares problem
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! and then estimates a heteroscedasticity-consistent covariance for β.
//!
//! Implementation choices:
//! - The solve uses SVD, which stays robust on tall design matrices and on the
//!   nearly collinear columns that categorical dummies plus correlated
//!   topology metrics can produce.
//! - The covariance is HC2:
//!
//! ```text
//! cov(β) = (XᵀX)⁻¹ [ Σ e_i²/(1-h_i) · x_i x_iᵀ ] (XᵀX)⁻¹
//! ```
//!
//!   with leverage `h_i = x_iᵀ (XᵀX)⁻¹ x_i`. The `1/(1-h_i)` factor corrects
//!   the downward bias of squared residuals at high-leverage rows.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Output of one least squares solve.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub beta: DVector<f64>,
    pub fitted: DVector<f64>,
    pub residuals: DVector<f64>,
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit OLS and compute fitted values and residuals.
pub fn fit_ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<OlsFit, AppError> {
    let beta = solve_least_squares(x, y)
        .ok_or_else(|| AppError::new(4, "Design matrix is too ill-conditioned to fit."))?;
    let fitted = x * &beta;
    let residuals = y - &fitted;
    Ok(OlsFit {
        beta,
        fitted,
        residuals,
    })
}

/// HC2 standard errors for a fitted model.
///
/// Fails if `XᵀX` is singular (perfectly collinear regressors) or if any row
/// has leverage `h_i >= 1` (that row fully determines its own fitted value,
/// e.g. a dummy level with a single observation).
pub fn hc2_standard_errors(x: &DMatrix<f64>, residuals: &DVector<f64>) -> Result<Vec<f64>, AppError> {
    let n = x.nrows();
    let p = x.ncols();

    let xtx = x.transpose() * x;
    let xtx_inv = xtx
        .try_inverse()
        .ok_or_else(|| AppError::new(4, "Singular design matrix (perfectly collinear regressors)."))?;

    // Scale each row by e_i / sqrt(1 - h_i); the meat is then XsᵀXs.
    let mut x_scaled = x.clone();
    for i in 0..n {
        let row = x.row(i);
        let h = (row * &xtx_inv * row.transpose())[(0, 0)];
        if !(h.is_finite() && h < 1.0 - 1e-10) {
            return Err(AppError::new(
                4,
                format!("Row {i} has leverage {h:.6} >= 1; HC2 covariance is undefined."),
            ));
        }
        let s = residuals[i] / (1.0 - h).sqrt();
        for j in 0..p {
            x_scaled[(i, j)] = x[(i, j)] * s;
        }
    }

    let meat = x_scaled.transpose() * &x_scaled;
    let cov = &xtx_inv * meat * &xtx_inv;

    let mut se = Vec::with_capacity(p);
    for j in 0..p {
        let v = cov[(j, j)].max(0.0);
        let s = v.sqrt();
        if !s.is_finite() {
            return Err(AppError::new(4, "Non-finite HC2 standard error."));
        }
        se.push(s);
    }
    Ok(se)
}
