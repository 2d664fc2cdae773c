//! Metrics setup and update for query execution.

use prometheus::core::{AtomicI64, AtomicU64, GenericCounter, GenericGauge};
use prometheus::Histogram;

use crate::store::PoolStatus;

#[derive(Debug, Clone)]
pub struct Metrics {
    pub query_total: GenericCounter<AtomicU64>,
    pub query_failures_total: GenericCounter<AtomicU64>,
    pub policy_rejections_total: GenericCounter<AtomicU64>,
    pub query_duration_seconds: Histogram,
    pub pool_size: GenericGauge<AtomicI64>,
    pub pool_idle_count: GenericGauge<AtomicI64>,
    pub pool_active_count: GenericGauge<AtomicI64>,
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericCounter<AtomicU64>, prometheus::Error> {
    let int_counter =
        prometheus::IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

/// Create a new int gauge metric and register it with the provided Prometheus Registry
fn add_int_gauge_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericGauge<AtomicI64>, prometheus::Error> {
    let int_gauge =
        prometheus::IntGauge::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_gauge.clone()))?;
    Ok(int_gauge)
}

/// Create a new histogram metric with the default buckets and register it
fn add_histogram_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<Histogram, prometheus::Error> {
    let histogram = Histogram::with_opts(prometheus::HistogramOpts::new(
        metric_name,
        metric_description,
    ))?;
    metrics_registry.register(Box::new(histogram.clone()))?;
    Ok(histogram)
}

impl Metrics {
    /// Set up counters, gauges and histograms used to produce Prometheus metrics.
    pub fn initialize(metrics_registry: &mut prometheus::Registry) -> Result<Self, prometheus::Error> {
        let query_total = add_int_counter_metric(
            metrics_registry,
            "materials_explorer_query_total",
            "Total successful queries.",
        )?;

        let query_failures_total = add_int_counter_metric(
            metrics_registry,
            "materials_explorer_query_failures_total",
            "Total queries that failed in the data store.",
        )?;

        let policy_rejections_total = add_int_counter_metric(
            metrics_registry,
            "materials_explorer_policy_rejections_total",
            "Total raw queries rejected by the read-only policy.",
        )?;

        let query_duration_seconds = add_histogram_metric(
            metrics_registry,
            "materials_explorer_query_duration_seconds",
            "Time spent in the data store per query, in seconds.",
        )?;

        let pool_size = add_int_gauge_metric(
            metrics_registry,
            "materials_explorer_pool_size",
            "The number of connections currently open. This includes idle connections.",
        )?;

        let pool_idle_count = add_int_gauge_metric(
            metrics_registry,
            "materials_explorer_pool_idle",
            "The number of connections open and idle (not in use).",
        )?;

        let pool_active_count = add_int_gauge_metric(
            metrics_registry,
            "materials_explorer_pool_active",
            "The number of connections in use. This does not include idle connections.",
        )?;

        Ok(Metrics {
            query_total,
            query_failures_total,
            policy_rejections_total,
            query_duration_seconds,
            pool_size,
            pool_idle_count,
            pool_active_count,
        })
    }

    /// Refresh the pool gauges from a snapshot taken by the store.
    pub fn update_pool_metrics(&self, status: PoolStatus) {
        let size = i64::from(status.size);
        let idle = i64::try_from(status.idle).unwrap_or(i64::MAX);
        self.pool_size.set(size);
        self.pool_idle_count.set(idle);
        self.pool_active_count.set(size.saturating_sub(idle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_gauges_follow_the_snapshot() {
        let mut registry = prometheus::Registry::new();
        let metrics = Metrics::initialize(&mut registry).unwrap();

        metrics.update_pool_metrics(PoolStatus { size: 4, idle: 1 });

        assert_eq!(metrics.pool_size.get(), 4);
        assert_eq!(metrics.pool_idle_count.get(), 1);
        assert_eq!(metrics.pool_active_count.get(), 3);
    }

    #[test]
    fn metrics_register_once_per_registry() {
        let mut registry = prometheus::Registry::new();
        Metrics::initialize(&mut registry).unwrap();
        assert!(Metrics::initialize(&mut registry).is_err());
    }
}
