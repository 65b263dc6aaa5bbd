//! Knowledge-base document store used for CV and reference documents.

use crate::error::ClientError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// File extensions the upload flow accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

/// Check an upload candidate against the accepted extension list.
pub fn is_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentInfo {
    pub file_name: String,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Upload/list/delete of reference documents. The core only triggers
/// these and reacts to success or failure.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn upload_document(&self, kb_id: &str, path: &Path) -> Result<(), ClientError>;
    async fn list_documents(&self, kb_id: &str) -> Result<Vec<DocumentInfo>, ClientError>;
    async fn remove_documents(&self, kb_id: &str, names: &[String]) -> Result<(), ClientError>;
}

pub struct HttpKnowledgeBase {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpKnowledgeBase {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    fn url(&self, kb_id: &str, tail: &str) -> String {
        format!(
            "{}/knowledge/{}/{}",
            self.base_url.trim_end_matches('/'),
            kb_id,
            tail
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    success: bool,
    error: Option<String>,
    #[serde(default)]
    documents: Vec<DocumentInfo>,
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    success: bool,
    error: Option<String>,
}

fn api_err(error: Option<String>) -> ClientError {
    ClientError::Api(error.unwrap_or_else(|| "Unknown error".to_string()))
}

#[async_trait]
impl KnowledgeBase for HttpKnowledgeBase {
    async fn upload_document(&self, kb_id: &str, path: &Path) -> Result<(), ClientError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| ClientError::Api("invalid file name".to_string()))?;
        let bytes = tokio::fs::read(path).await?;
        debug!("uploading {} ({} bytes) to kb {}", file_name, bytes.len(), kb_id);

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);
        let ack: AckEnvelope = self
            .authorized(self.client.post(self.url(kb_id, "documents")))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !ack.success {
            return Err(api_err(ack.error));
        }
        info!("uploaded {} to knowledge base {}", file_name, kb_id);
        Ok(())
    }

    async fn list_documents(&self, kb_id: &str) -> Result<Vec<DocumentInfo>, ClientError> {
        let envelope: ListEnvelope = self
            .authorized(self.client.get(self.url(kb_id, "documents")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !envelope.success {
            return Err(api_err(envelope.error));
        }
        Ok(envelope.documents)
    }

    async fn remove_documents(&self, kb_id: &str, names: &[String]) -> Result<(), ClientError> {
        let ack: AckEnvelope = self
            .authorized(self.client.delete(self.url(kb_id, "documents")))
            .json(&serde_json::json!({ "file_names": names }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !ack.success {
            return Err(api_err(ack.error));
        }
        Ok(())
    }
}
