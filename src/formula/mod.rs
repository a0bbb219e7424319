//! Regression formula construction and parsing.
//!
//! Responsibilities:
//!
//! - the fixed graph-topology regressor catalog (`vars`)
//! - typed formula terms and the `response ~ a + b + ...` grammar (`term`)
//! - mode-conditioned formula building (`builder`)

pub mod builder;
pub mod term;
pub mod vars;

pub use builder::*;
pub use term::*;
pub use vars::*;
