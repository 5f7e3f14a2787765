// the vector index contract
use serde::{Deserialize, Serialize};

use crate::chunker::IndexMetadata;

/// One vector to upsert: chunk id, embedding, text, and search metadata
#[derive(Debug, Serialize)]
pub struct VectorEntry {
    pub id: String,
    pub values: Vec<f32>,
    pub text: String,
    pub metadata: IndexMetadata,
}

#[derive(Debug, Serialize)]
pub struct UpsertRequest {
    pub namespace: String,
    pub vectors: Vec<VectorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertResponse {
    pub upserted: usize,
}
