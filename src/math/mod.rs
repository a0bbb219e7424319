//! Mathematical utilities: least squares, robust covariance, and tail
//! probabilities.

pub mod ols;
pub mod stats;

pub use ols::*;
pub use stats::*;
