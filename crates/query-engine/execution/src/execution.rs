//! Execute catalog and raw queries against the data store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use query_engine_metadata::metadata::{QueryCatalog, QueryDefinition, StatsQueries};
use tracing::{info_span, Instrument};

use crate::error::QueryError;
use crate::metrics::Metrics;
use crate::policy;
use crate::store::Store;
use crate::value::ResultRow;

/// What to run: a curated query by identifier, or caller-supplied SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionRequest {
    ByCatalogId(String),
    RawSql(String),
}

/// The rows produced by one statement and how long the store took.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// The catalog entry that was run, if the request named one.
    pub query: Option<QueryDefinition>,
    pub rows: Vec<ResultRow>,
    /// Wall-clock time around the store call only, in milliseconds, rounded
    /// to two decimals.
    pub elapsed_ms: f64,
}

/// Resolves requests to SQL, gates them, runs them and times them.
///
/// The service holds no per-request state and may be shared freely between
/// concurrent handlers.
pub struct ExecutionService {
    catalog: QueryCatalog,
    store: Arc<dyn Store>,
    pub(crate) stats_queries: StatsQueries,
    metrics: Metrics,
}

impl ExecutionService {
    pub fn new(
        catalog: QueryCatalog,
        store: Arc<dyn Store>,
        stats_queries: StatsQueries,
        metrics: Metrics,
    ) -> Self {
        ExecutionService {
            catalog,
            store,
            stats_queries,
            metrics,
        }
    }

    pub fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub(crate) fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Refresh the gauges that are sampled rather than counted.
    pub fn update_pool_metrics(&self) {
        if let Some(status) = self.store.pool_status() {
            self.metrics.update_pool_metrics(status);
        }
    }

    pub async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult, QueryError> {
        match request {
            ExecutionRequest::ByCatalogId(id) => self.run_catalog_query(&id).await,
            ExecutionRequest::RawSql(sql) => self.run_raw_query(&sql).await,
        }
    }

    /// Run a catalog entry verbatim. Catalog SQL is trusted and does not go
    /// through the read-only policy.
    pub async fn run_catalog_query(&self, id: &str) -> Result<ExecutionResult, QueryError> {
        let definition = self
            .catalog
            .lookup(id)
            .ok_or_else(|| QueryError::NotFound { id: id.to_string() })?;

        let (rows, elapsed) = self
            .timed(&definition.sql)
            .instrument(info_span!("Execute catalog query", query.id = %definition.id))
            .await?;

        Ok(ExecutionResult {
            query: Some(definition.clone()),
            rows,
            elapsed_ms: round_millis(elapsed),
        })
    }

    /// Run caller-supplied SQL once it passes the read-only policy.
    pub async fn run_raw_query(&self, sql: &str) -> Result<ExecutionResult, QueryError> {
        let sql = policy::check_read_only(sql).map_err(|error| {
            if error == QueryError::PolicyViolation {
                self.metrics.policy_rejections_total.inc();
            }
            error
        })?;

        let (rows, elapsed) = self
            .timed(sql)
            .instrument(info_span!("Execute raw query"))
            .await?;

        Ok(ExecutionResult {
            query: None,
            rows,
            elapsed_ms: round_millis(elapsed),
        })
    }

    async fn timed(&self, sql: &str) -> Result<(Vec<ResultRow>, Duration), QueryError> {
        let start = Instant::now();
        let result = self.store.execute(sql).await;
        let elapsed = start.elapsed();

        self.metrics
            .query_duration_seconds
            .observe(elapsed.as_secs_f64());

        match result {
            Ok(rows) => {
                self.metrics.query_total.inc();
                tracing::info!(rows = rows.len(), elapsed_ms = round_millis(elapsed));
                Ok((rows, elapsed))
            }
            Err(error) => {
                self.metrics.query_failures_total.inc();
                tracing::error!(sql, error = %error, "query failed in the data store");
                Err(QueryError::ExecutionFailure(error))
            }
        }
    }
}

/// Milliseconds rounded half away from zero to two decimal places.
#[allow(clippy::cast_precision_loss)]
pub fn round_millis(elapsed: Duration) -> f64 {
    (elapsed.as_nanos() as f64 / 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_time_keeps_two_decimals() {
        assert_eq!(round_millis(Duration::from_micros(12_345)), 12.35);
        assert_eq!(round_millis(Duration::from_micros(12_344)), 12.34);
        assert_eq!(round_millis(Duration::from_secs(2)), 2000.0);
        assert_eq!(round_millis(Duration::ZERO), 0.0);
    }
}
