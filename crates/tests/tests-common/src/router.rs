//! Build a router around fixtures and drive it in-process.

use std::sync::Arc;

use axum_test_helper::TestClient;

use materials_explorer::bridge::SqlGenerator;
use materials_explorer::routes::create_router;
use materials_explorer::state::AppState;
use query_engine_execution::metrics::Metrics;
use query_engine_execution::store::Store;
use query_engine_execution::ExecutionService;
use query_engine_metadata::metadata::{QueryCatalog, StatsQueries};

/// Server state over the reference catalog, with a registry of its own.
pub fn app_state(store: Arc<dyn Store>, bridge: Option<Arc<dyn SqlGenerator>>) -> AppState {
    let mut metrics_registry = prometheus::Registry::new();
    let metrics = Metrics::initialize(&mut metrics_registry).unwrap();
    let service = ExecutionService::new(
        QueryCatalog::reference(),
        store,
        StatsQueries::default(),
        metrics,
    );
    AppState {
        service: Arc::new(service),
        bridge,
        metrics_registry,
    }
}

pub fn test_client(store: Arc<dyn Store>, bridge: Option<Arc<dyn SqlGenerator>>) -> TestClient {
    crate::init_test_logging();
    TestClient::new(create_router(app_state(store, bridge)))
}
