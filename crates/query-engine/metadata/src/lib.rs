//! Metadata for the query engine: the catalog of predefined analytical queries
//! and the aggregates behind the dashboard statistics.

pub mod metadata;
