// model.rs - metadata about the embedding model in use
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub dim: usize,
    pub max_batch: usize,
}

impl EmbeddingModelInfo {
    pub fn new(name: impl Into<String>, dim: usize, max_batch: usize) -> Self {
        Self {
            name: name.into(),
            dim,
            max_batch,
        }
    }

    /// The model the downstream index dimension (1536) is sized for
    pub fn ada_002() -> Self {
        Self::new("text-embedding-ada-002", 1536, 64)
    }
}

impl Default for EmbeddingModelInfo {
    fn default() -> Self {
        Self::ada_002()
    }
}
