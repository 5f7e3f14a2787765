// client.rs - HTTP client for the embedding server
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::types::{EmbeddingRequest, EmbeddingResponse};

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Embedding server returned status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Embedding server rejected credentials (status {status})")]
    Unauthorized { status: u16 },

    #[error("Expected {expected} embeddings, server returned {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

pub struct EmbeddingClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl EmbeddingClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Attach a bearer token to every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Embed a batch of texts, one vector per input text in input order.
    pub async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let expected = texts.len();
        let req = EmbeddingRequest { texts };

        let mut request = self.http.post(format!("{}/embed", self.endpoint)).json(&req);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(EmbedError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EmbedError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let res: EmbeddingResponse = response.json().await?;
        if res.embeddings.len() != expected {
            return Err(EmbedError::CountMismatch {
                expected,
                actual: res.embeddings.len(),
            });
        }

        debug!(count = res.embeddings.len(), "received embeddings");
        Ok(res.embeddings)
    }
}
