//! Reporting: side-by-side summary tables of fitted models.

pub mod table;

pub use table::*;
