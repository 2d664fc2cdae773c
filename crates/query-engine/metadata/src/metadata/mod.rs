//! Metadata information regarding the predefined queries and dashboard aggregates.

pub mod catalog;
pub mod reference;
pub mod stats;

// re-export without modules
pub use catalog::*;
pub use stats::*;
