//! Input/output helpers.
//!
//! - export path templating (`paths`)
//! - CSV dataset ingest (`ingest`)
//! - summary-table JSON/text exports (`export`)

pub mod export;
pub mod ingest;
pub mod paths;

pub use export::*;
pub use ingest::*;
pub use paths::*;
