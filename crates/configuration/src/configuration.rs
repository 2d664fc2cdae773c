//! Configuration for the service.

use std::time::Duration;

use query_engine_metadata::metadata::{QueryCatalog, StatsQueries};

use crate::bridge_settings::BridgeSettings;
use crate::values::PoolSettings;

/// The 'Configuration' type collects all the information necessary to serve requests at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which resolves secrets and validates the catalog.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub backend: Backend,
    pub connection_uri: String,
    pub pool_settings: PoolSettings,
    pub statement_timeout: Duration,
    pub catalog: QueryCatalog,
    pub stats: StatsQueries,
    pub bridge: Option<BridgeSettings>,
}

/// The relational backends we can serve from, chosen by connection URI scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    MySql,
    Sqlite,
}

impl Backend {
    pub fn from_connection_uri(uri: &str) -> Option<Backend> {
        if uri.starts_with("mysql://") || uri.starts_with("mariadb://") {
            Some(Backend::MySql)
        } else if uri.starts_with("sqlite:") {
            Some(Backend::Sqlite)
        } else {
            None
        }
    }
}
