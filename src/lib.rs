// Public API exports
pub mod chunker;
pub mod config;
pub mod db;
pub mod embedder;
pub mod export;
pub mod indexer;
pub mod loader;
pub mod pipeline;

// Re-export main types for convenience
pub use chunker::{
    Chunk, ChunkRecord, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_SEPARATOR, IndexMetadata, SplitConfig,
    SplitError, assemble, extract_title, split,
};

pub use config::AppConfig;

pub use db::ChunkStore;

pub use embedder::{Batcher, EmbedError, EmbeddingClient, EmbeddingModelInfo};

pub use export::{RecordExporter, RunManifest};

pub use indexer::{IndexError, VectorIndexClient};

pub use loader::{LoadError, load_document, load_documents};

pub use pipeline::{Document, MAX_DOCUMENT_CHARS, PipelineError, process, process_at};
