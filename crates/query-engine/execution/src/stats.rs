//! Headline statistics over the materials table.

use serde::Serialize;
use tracing::{info_span, Instrument};

use crate::error::{QueryError, StoreError};
use crate::execution::ExecutionService;
use crate::value::{ResultRow, ScalarValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_materials: i64,
    pub distinct_categories: i64,
    pub category_a_count: i64,
    pub category_b_count: i64,
}

impl ExecutionService {
    /// Run the four aggregate queries. Either all four succeed or the call
    /// fails as a whole.
    pub async fn get_stats(&self) -> Result<Stats, QueryError> {
        let queries = &self.stats_queries;

        let (total_materials, distinct_categories, category_a_count, category_b_count) =
            tokio::try_join!(
                self.count(&queries.total_materials),
                self.count(&queries.distinct_categories),
                self.count(&queries.category_a_count),
                self.count(&queries.category_b_count),
            )
            .map_err(|error| {
                self.metrics().query_failures_total.inc();
                tracing::error!(error = %error, "could not compute statistics");
                QueryError::ExecutionFailure(error)
            })?;

        self.metrics().query_total.inc();
        Ok(Stats {
            total_materials,
            distinct_categories,
            category_a_count,
            category_b_count,
        })
    }

    async fn count(&self, sql: &str) -> Result<i64, StoreError> {
        let rows = self
            .store()
            .execute(sql)
            .instrument(info_span!("Execute statistics query"))
            .await?;
        first_integer(&rows)
    }
}

/// The first column of the first row, read as an integer. A missing row or
/// a null counts as zero.
fn first_integer(rows: &[ResultRow]) -> Result<i64, StoreError> {
    match rows.first().and_then(|row| row.values().next()) {
        None | Some(ScalarValue::Null) => Ok(0),
        Some(ScalarValue::Integer(value)) => Ok(*value),
        #[allow(clippy::cast_possible_truncation)]
        Some(ScalarValue::Float(value)) if value.fract() == 0.0 => Ok(*value as i64),
        Some(other) => Err(StoreError::UnexpectedShape(format!(
            "expected an integer aggregate, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    fn single(value: ScalarValue) -> Vec<ResultRow> {
        vec![IndexMap::from([("n".to_string(), value)])]
    }

    #[test]
    fn counts_are_read_from_the_first_cell() {
        assert_eq!(first_integer(&single(ScalarValue::Integer(42))), Ok(42));
        assert_eq!(first_integer(&single(ScalarValue::Float(7.0))), Ok(7));
        assert_eq!(first_integer(&single(ScalarValue::Null)), Ok(0));
        assert_eq!(first_integer(&[]), Ok(0));
    }

    #[test]
    fn non_integers_are_rejected() {
        assert!(first_integer(&single(ScalarValue::Text("many".into()))).is_err());
        assert!(first_integer(&single(ScalarValue::Float(0.5))).is_err());
    }

    #[test]
    fn stats_serialize_in_camel_case() {
        let stats = Stats {
            total_materials: 16,
            distinct_categories: 3,
            category_a_count: 5,
            category_b_count: 2,
        };
        assert_eq!(
            serde_json::to_value(stats).unwrap(),
            serde_json::json!({
                "totalMaterials": 16,
                "distinctCategories": 3,
                "categoryACount": 5,
                "categoryBCount": 2
            })
        );
    }
}
