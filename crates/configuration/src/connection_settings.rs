//! Database connection settings.

use crate::values::{ConnectionUri, PoolSettings, Secret, Variable};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONNECTION_URI_VARIABLE: &str = "MATERIALS_EXPLORER_DATABASE_URL";

/// Database connection settings.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConnectionSettings {
    /// Connection string for a MySQL or SQLite database.
    pub connection_uri: ConnectionUri,
    /// Connection pool settings.
    #[serde(default, skip_serializing_if = "PoolSettings::is_default")]
    pub pool_settings: PoolSettings,
    /// Upper bound on the execution of a single statement, in milliseconds.
    #[serde(default = "statement_timeout_ms_default")]
    pub statement_timeout_ms: u64,
}

impl DatabaseConnectionSettings {
    pub fn empty() -> Self {
        Self {
            connection_uri: ConnectionUri(Secret::FromEnvironment {
                variable: Variable::from(DEFAULT_CONNECTION_URI_VARIABLE),
            }),
            pool_settings: PoolSettings::default(),
            statement_timeout_ms: statement_timeout_ms_default(),
        }
    }
}

fn statement_timeout_ms_default() -> u64 {
    30_000
}
