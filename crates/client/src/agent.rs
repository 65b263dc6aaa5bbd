//! Remote agent invocation transport.

use crate::error::ClientError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Flattened reply from a remote agent invocation. `success:false`
/// carries the error string; a successful reply may carry a free-text
/// message, a structured result payload, or both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentReply {
    pub success: bool,
    pub error: Option<String>,
    pub message: Option<String>,
    pub result: Option<Value>,
}

/// Opaque async request/response API keyed by agent id and a
/// natural-language instruction.
#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn invoke(&self, agent_id: &str, instruction: &str) -> Result<AgentReply, ClientError>;
}

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    agent_id: &'a str,
    message: &'a str,
}

/// Wire envelope: `{ success, error?, response: { message?, result? } }`.
#[derive(Debug, Deserialize)]
struct InvokeEnvelope {
    success: bool,
    error: Option<String>,
    response: Option<InvokeResponse>,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    message: Option<String>,
    result: Option<Value>,
}

/// HTTP implementation of the invocation transport.
pub struct HttpAgentClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpAgentClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl AgentInvoker for HttpAgentClient {
    async fn invoke(&self, agent_id: &str, instruction: &str) -> Result<AgentReply, ClientError> {
        let url = format!("{}/agents/invoke", self.base_url.trim_end_matches('/'));
        debug!("invoking agent {} via {}", agent_id, url);

        let mut request = self.client.post(&url).json(&InvokeRequest {
            agent_id,
            message: instruction,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let envelope: InvokeEnvelope = request.send().await?.error_for_status()?.json().await?;
        info!("agent {} replied, success={}", agent_id, envelope.success);

        let response = envelope.response.unwrap_or(InvokeResponse {
            message: None,
            result: None,
        });
        Ok(AgentReply {
            success: envelope.success,
            error: envelope.error,
            message: response.message,
            result: response.result,
        })
    }
}
