//! Transient state used by the server.
//!
//! This is initialized on startup.

use std::sync::Arc;
use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::Executor;
use thiserror::Error;
use tracing::{info_span, Instrument};

use materials_explorer_configuration::{Backend, Configuration, PoolSettings};
use query_engine_execution::metrics::Metrics;
use query_engine_execution::store::{MySqlStore, SqliteStore, Store};
use query_engine_execution::ExecutionService;

use crate::bridge::{self, BridgeError, SqlGenerator};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ExecutionService>,
    pub bridge: Option<Arc<dyn SqlGenerator>>,
    pub metrics_registry: prometheus::Registry,
}

/// Connect to the store and wrap everything a request needs inside an
/// [`AppState`].
pub async fn create_state(
    configuration: Configuration,
    metrics_registry: &mut prometheus::Registry,
) -> Result<AppState, InitializationError> {
    let store = create_store(&configuration)
        .instrument(info_span!("Create store"))
        .await?;

    let metrics = async {
        Metrics::initialize(metrics_registry).map_err(InitializationError::MetricsError)
    }
    .instrument(info_span!("Setup metrics"))
    .await?;

    let bridge = configuration
        .bridge
        .as_ref()
        .map(bridge::create_generator)
        .transpose()
        .map_err(InitializationError::BridgeError)?;

    let service = ExecutionService::new(
        configuration.catalog,
        store,
        configuration.stats,
        metrics,
    );

    Ok(AppState {
        service: Arc::new(service),
        bridge,
        metrics_registry: metrics_registry.clone(),
    })
}

async fn create_store(
    configuration: &Configuration,
) -> Result<Arc<dyn Store>, InitializationError> {
    let pool_settings = &configuration.pool_settings;
    let statement_timeout = configuration.statement_timeout;

    Ok(match configuration.backend {
        Backend::MySql => {
            let pool = create_mysql_pool(
                &configuration.connection_uri,
                pool_settings,
                statement_timeout,
            )
            .await?;
            Arc::new(MySqlStore::new(pool, statement_timeout))
        }
        Backend::Sqlite => {
            let pool = create_sqlite_pool(&configuration.connection_uri, pool_settings).await?;
            Arc::new(SqliteStore::new(pool, statement_timeout))
        }
    })
}

/// Create a MySQL connection pool. Each new connection also gets a
/// server-side execution limit matching the statement timeout.
/// - <https://docs.rs/sqlx/latest/sqlx/pool/struct.PoolOptions.html>
async fn create_mysql_pool(
    connection_uri: &str,
    pool_settings: &PoolSettings,
    statement_timeout: Duration,
) -> Result<sqlx::MySqlPool, InitializationError> {
    let max_execution_time = statement_timeout.as_millis();

    MySqlPoolOptions::new()
        .max_connections(pool_settings.max_connections)
        .acquire_timeout(Duration::from_secs(pool_settings.pool_timeout))
        .idle_timeout(pool_settings.idle_timeout.map(Duration::from_secs))
        .max_lifetime(pool_settings.connection_lifetime.map(Duration::from_secs))
        .after_connect(move |connection, _metadata| {
            Box::pin(async move {
                let statement = format!("SET SESSION max_execution_time = {max_execution_time}");
                // MariaDB names this variable differently; the client-side
                // timeout still applies there.
                if let Err(error) = connection.execute(statement.as_str()).await {
                    tracing::warn!(error = %error, "could not set max_execution_time");
                }
                Ok(())
            })
        })
        .connect(connection_uri)
        .await
        .map_err(InitializationError::UnableToCreatePool)
}

async fn create_sqlite_pool(
    connection_uri: &str,
    pool_settings: &PoolSettings,
) -> Result<sqlx::SqlitePool, InitializationError> {
    SqlitePoolOptions::new()
        .max_connections(pool_settings.max_connections)
        .acquire_timeout(Duration::from_secs(pool_settings.pool_timeout))
        .idle_timeout(pool_settings.idle_timeout.map(Duration::from_secs))
        .max_lifetime(pool_settings.connection_lifetime.map(Duration::from_secs))
        .connect(connection_uri)
        .await
        .map_err(InitializationError::UnableToCreatePool)
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to initialize connection pool: {0}")]
    UnableToCreatePool(sqlx::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
    #[error("error initializing the LLM bridge: {0}")]
    BridgeError(BridgeError),
}
