//! The scalar aggregates shown on the dashboard.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Four independent scalar aggregate statements. Each must return a single
/// row whose first column is an integer.
///
/// The defaults are the reference predicates: total rows, distinct crystal
/// systems, semiconductors (band gap within 0.1..=3.0 eV) and metals (band gap
/// exactly zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsQueries {
    #[serde(default = "total_materials_default")]
    pub total_materials: String,
    #[serde(default = "distinct_categories_default")]
    pub distinct_categories: String,
    #[serde(default = "category_a_default")]
    pub category_a_count: String,
    #[serde(default = "category_b_default")]
    pub category_b_count: String,
}

impl StatsQueries {
    pub fn is_default(&self) -> bool {
        *self == StatsQueries::default()
    }
}

impl Default for StatsQueries {
    fn default() -> Self {
        StatsQueries {
            total_materials: "SELECT COUNT(*) FROM materials".to_string(),
            distinct_categories: "SELECT COUNT(DISTINCT crystal_system) FROM materials WHERE crystal_system IS NOT NULL".to_string(),
            category_a_count: "SELECT COUNT(*) FROM materials WHERE band_gap BETWEEN 0.1 AND 3.0".to_string(),
            category_b_count: "SELECT COUNT(*) FROM materials WHERE band_gap = 0.0".to_string(),
        }
    }
}

// for serde default //
fn total_materials_default() -> String {
    StatsQueries::default().total_materials
}
fn distinct_categories_default() -> String {
    StatsQueries::default().distinct_categories
}
fn category_a_default() -> String {
    StatsQueries::default().category_a_count
}
fn category_b_default() -> String {
    StatsQueries::default().category_b_count
}
