//! Settings for the external natural-language-to-SQL bridge.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How to reach the bridge. Both variants share one contract: send
/// `{"question": ...}` as JSON and read back `{"success", "answer" | "error"}`.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum BridgeSettings {
    /// Spawn a local process per question, framing over stdin/stdout.
    /// A non-zero exit status is a failure.
    Command(CommandBridgeSettings),
    /// POST the question to an HTTP endpoint.
    Http(HttpBridgeSettings),
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommandBridgeSettings {
    pub program: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default = "bridge_timeout_ms_default")]
    pub timeout_ms: u64,
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpBridgeSettings {
    pub url: url::Url,
    #[serde(default = "bridge_timeout_ms_default")]
    pub timeout_ms: u64,
}

fn bridge_timeout_ms_default() -> u64 {
    60_000
}
