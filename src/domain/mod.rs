//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run parameterization enums (`Mode`, `OutLog`)
//! - the per-run specification (`RunSpec`) and batch configuration (`RunConfig`)
//! - fit outputs (`FittedModel`, `Coefficient`, `FitQuality`)

pub mod types;

pub use types::*;
