//! In-memory tabular data.
//!
//! - column-oriented frame with numeric/categorical columns (`frame`)
//! - pre-fit rescaling of the topology catalog (`normalize`)

pub mod frame;
pub mod normalize;

pub use frame::*;
pub use normalize::*;
