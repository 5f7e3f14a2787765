// client.rs - HTTP client for the remote vector index
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{UpsertRequest, UpsertResponse, VectorEntry};
use crate::chunker::Chunk;

/// Attempts per upsert before giving up on transient failures
const MAX_ATTEMPTS: u32 = 3;
/// First backoff delay; doubles on each retry
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Index returned status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Index rejected credentials (status {status})")]
    Unauthorized { status: u16 },

    #[error("Got {chunks} chunks but {embeddings} embeddings")]
    LengthMismatch { chunks: usize, embeddings: usize },
}

impl IndexError {
    /// Transient failures are worth retrying; auth and client errors are not.
    fn is_retryable(&self) -> bool {
        match self {
            IndexError::RequestFailed(_) => true,
            IndexError::ServerError { status, .. } => *status >= 500,
            IndexError::Unauthorized { .. } | IndexError::LengthMismatch { .. } => false,
        }
    }
}

pub struct VectorIndexClient {
    http: Client,
    endpoint: String,
    namespace: String,
    api_key: Option<String>,
}

impl VectorIndexClient {
    pub fn new(endpoint: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            namespace: namespace.into(),
            api_key: None,
        }
    }

    /// Attach a bearer token to every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Upsert chunks and their embeddings in one request.
    ///
    /// `embeddings[i]` must belong to `chunks[i]`. The index deduplicates by
    /// chunk id, so repeating an upsert is safe.
    pub async fn upsert_chunks(
        &self,
        chunks: &[Chunk],
        embeddings: &[Vec<f32>],
    ) -> Result<usize, IndexError> {
        if chunks.len() != embeddings.len() {
            return Err(IndexError::LengthMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }
        if chunks.is_empty() {
            return Ok(0);
        }

        let vectors: Vec<VectorEntry> = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, values)| VectorEntry {
                id: chunk.id.clone(),
                values: values.clone(),
                text: chunk.text.clone(),
                metadata: chunk.index_metadata(),
            })
            .collect();

        let req = UpsertRequest {
            namespace: self.namespace.clone(),
            vectors,
        };

        let mut request = self.http.post(format!("{}/upsert", self.endpoint)).json(&req);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(IndexError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(IndexError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let res: UpsertResponse = response.json().await?;
        debug!(upserted = res.upserted, namespace = %self.namespace, "upsert complete");
        Ok(res.upserted)
    }

    /// [`upsert_chunks`](Self::upsert_chunks) with bounded retries and
    /// exponential backoff on transient failures.
    pub async fn upsert_with_retry(
        &self,
        chunks: &[Chunk],
        embeddings: &[Vec<f32>],
    ) -> Result<usize, IndexError> {
        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 1;

        loop {
            match self.upsert_chunks(chunks, embeddings).await {
                Ok(upserted) => return Ok(upserted),
                Err(err) if attempt < MAX_ATTEMPTS && err.is_retryable() => {
                    warn!(attempt, backoff_ms = backoff.as_millis() as u64, error = %err, "upsert failed, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
