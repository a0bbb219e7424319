//! Normal tail probabilities and significance stars.
//!
//! Robust (HC) covariances pair with normal-based inference, so p-values here
//! are two-sided standard-normal tail probabilities of the z statistic. The
//! CDF uses the Abramowitz–Stegun 7.1.26 polynomial for `erf`, accurate to
//! about 1.5e-7, which is far below anything that could move a star.

/// Standard normal CDF.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Two-sided p-value for a z statistic.
pub fn two_sided_p(z: f64) -> f64 {
    if z.is_nan() {
        return 1.0;
    }
    if z.is_infinite() {
        return 0.0;
    }
    (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0)
}

/// Significance stars at the conventional 0.1 / 0.05 / 0.01 thresholds.
pub fn significance_stars(p: f64) -> &'static str {
    if p < 0.01 {
        "***"
    } else if p < 0.05 {
        "**"
    } else if p < 0.1 {
        "*"
    } else {
        ""
    }
}

fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();
    sign * y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdf_reference_values() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-3);
        assert!((normal_cdf(-1.96) - 0.025).abs() < 1e-3);
        assert!(normal_cdf(8.0) > 0.999999);
    }

    #[test]
    fn two_sided_p_behaves_at_the_edges() {
        assert!((two_sided_p(0.0) - 1.0).abs() < 1e-7);
        assert!(two_sided_p(5.0) < 1e-5);
        assert_eq!(two_sided_p(f64::INFINITY), 0.0);
        assert_eq!(two_sided_p(f64::NAN), 1.0);
    }

    #[test]
    fn star_thresholds() {
        assert_eq!(significance_stars(0.005), "***");
        assert_eq!(significance_stars(0.03), "**");
        assert_eq!(significance_stars(0.07), "*");
        assert_eq!(significance_stars(0.2), "");
    }
}
