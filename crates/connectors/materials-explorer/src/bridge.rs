//! Clients for the natural-language-to-SQL bridge.
//!
//! The bridge is an opaque collaborator: we send it `{"question": ...}` and
//! expect `{"success": true, "answer": "<sql>"}` or
//! `{"success": false, "error": "..."}` back. Whatever it answers is
//! untrusted and goes through the read-only policy like any other raw SQL.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use materials_explorer_configuration::bridge_settings::{
    BridgeSettings, CommandBridgeSettings, HttpBridgeSettings,
};

/// Turns a question into SQL text.
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    async fn generate(&self, question: &str) -> Result<String, BridgeError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("Failed to start LLM bridge: {0}")]
    Spawn(String),
    #[error("LLM bridge exited with code {}", .0.map_or_else(|| "unknown".to_string(), |code| code.to_string()))]
    Exit(Option<i32>),
    #[error("LLM bridge timed out after {0} ms")]
    Timeout(u64),
    #[error("LLM bridge request failed: {0}")]
    Transport(String),
    #[error("Invalid response from LLM bridge: {0}")]
    InvalidResponse(String),
    /// The bridge answered, but reported its own failure.
    #[error("{0}")]
    Rejected(String),
    #[error("LLM returned empty answer")]
    EmptyAnswer,
}

#[derive(Debug, Serialize)]
struct BridgeRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct BridgeReply {
    success: bool,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl BridgeReply {
    fn into_answer(self) -> Result<String, BridgeError> {
        if self.success {
            non_empty(clean_answer(self.answer.as_deref().unwrap_or_default()))
        } else {
            Err(BridgeError::Rejected(
                self.error
                    .unwrap_or_else(|| "Unknown error from LLM".to_string()),
            ))
        }
    }
}

/// Build the configured bridge client.
pub fn create_generator(settings: &BridgeSettings) -> Result<Arc<dyn SqlGenerator>, BridgeError> {
    Ok(match settings {
        BridgeSettings::Command(settings) => Arc::new(CommandBridge::new(settings)),
        BridgeSettings::Http(settings) => Arc::new(HttpBridge::new(settings)?),
    })
}

/// Strip markdown fences and a leading `sql` language tag from generated
/// text.
pub fn clean_answer(text: &str) -> String {
    let text = text.replace('`', "");
    let text = text.trim();
    text.strip_prefix("sql").unwrap_or(text).trim().to_string()
}

fn non_empty(answer: String) -> Result<String, BridgeError> {
    if answer.is_empty() {
        Err(BridgeError::EmptyAnswer)
    } else {
        Ok(answer)
    }
}

/// Runs a local program per question. The request goes to its standard input,
/// the answer comes from its standard output, and a non-zero exit status is a
/// failure.
#[derive(Debug, Clone)]
pub struct CommandBridge {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandBridge {
    pub fn new(settings: &CommandBridgeSettings) -> Self {
        CommandBridge {
            program: settings.program.clone(),
            args: settings.args.clone(),
            timeout: Duration::from_millis(settings.timeout_ms),
        }
    }
}

#[async_trait]
impl SqlGenerator for CommandBridge {
    async fn generate(&self, question: &str) -> Result<String, BridgeError> {
        let payload = serde_json::to_vec(&BridgeRequest { question })
            .map_err(|error| BridgeError::Spawn(error.to_string()))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| BridgeError::Spawn(error.to_string()))?;

        let stdin = child.stdin.take();
        let exchange = async move {
            if let Some(mut stdin) = stdin {
                // A child that exits without reading still gets its exit
                // status reported below.
                if let Err(error) = stdin.write_all(&payload).await {
                    tracing::warn!(error = %error, "could not write the question to the LLM bridge");
                }
            }
            child.wait_with_output().await
        };

        let output = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| {
                BridgeError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
            })?
            .map_err(|error| BridgeError::Spawn(error.to_string()))?;

        if !output.stderr.is_empty() {
            tracing::warn!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "LLM bridge wrote to stderr"
            );
        }

        if !output.status.success() {
            tracing::error!(
                stdout = %String::from_utf8_lossy(&output.stdout),
                "LLM bridge exited unsuccessfully"
            );
            return Err(BridgeError::Exit(output.status.code()));
        }

        parse_process_output(&output.stdout)
    }
}

/// A JSON reply object is honored; any other output is the answer itself.
fn parse_process_output(stdout: &[u8]) -> Result<String, BridgeError> {
    match serde_json::from_slice::<BridgeReply>(stdout) {
        Ok(reply) => reply.into_answer(),
        Err(_) => non_empty(clean_answer(&String::from_utf8_lossy(stdout))),
    }
}

/// Posts the question to an HTTP endpoint speaking the same JSON contract.
#[derive(Debug, Clone)]
pub struct HttpBridge {
    client: reqwest::Client,
    url: String,
}

impl HttpBridge {
    pub fn new(settings: &HttpBridgeSettings) -> Result<Self, BridgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|error| BridgeError::Transport(error.to_string()))?;
        Ok(HttpBridge {
            client,
            url: settings.url.to_string(),
        })
    }
}

#[async_trait]
impl SqlGenerator for HttpBridge {
    async fn generate(&self, question: &str) -> Result<String, BridgeError> {
        let response = self
            .client
            .post(&self.url)
            .json(&BridgeRequest { question })
            .send()
            .await
            .map_err(|error| BridgeError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Transport(format!(
                "the bridge answered with status {status}"
            )));
        }

        let reply: BridgeReply = response
            .json()
            .await
            .map_err(|error| BridgeError::InvalidResponse(error.to_string()))?;
        reply.into_answer()
    }
}
