//! Query execution against the relational store.
//!
//! The [`execution::ExecutionService`] is the single entry point: it resolves
//! catalog identifiers, gates raw SQL through the read-only policy, runs the
//! statement through a [`store::Store`] and times it.

pub mod error;
pub mod execution;
pub mod metrics;
pub mod policy;
pub mod stats;
pub mod store;
pub mod value;

pub use error::{ErrorKind, QueryError, StoreError};
pub use execution::{ExecutionRequest, ExecutionResult, ExecutionService};
pub use stats::Stats;
pub use store::Store;
pub use value::{ResultRow, ScalarValue};
