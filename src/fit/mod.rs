//! Regression fitting orchestration.
//!
//! Responsibilities:
//!
//! - resolve a formula against a frame into response/design matrices (`matrices`)
//! - fit each formula with HC2-robust OLS, optionally in parallel (`fitter`)

pub mod fitter;
pub mod matrices;

pub use fitter::*;
pub use matrices::*;
