use chrono::{DateTime, Local};
use thiserror::Error;

use crate::chunker::{Chunk, SplitConfig, SplitError, assemble, char_len, split};

/// Longest document the pipeline accepts, in characters
pub const MAX_DOCUMENT_CHARS: usize = 1_000_000;

/// A source document awaiting chunking
#[derive(Debug, Clone)]
pub struct Document {
    /// Stable identifier, typically the source filename
    pub source_id: String,
    /// Full Markdown text
    pub text: String,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("document '{0}' is empty or whitespace-only")]
    EmptyDocument(String),

    #[error("document '{source_id}' is too large: {chars} characters (max: {max})")]
    DocumentTooLarge {
        source_id: String,
        chars: usize,
        max: usize,
    },

    #[error(transparent)]
    Split(#[from] SplitError),
}

/// Chunk one document, stamping chunks with the current local time.
pub fn process(document: &Document, config: &SplitConfig) -> Result<Vec<Chunk>, PipelineError> {
    process_at(document, config, Local::now())
}

/// Chunk one document with an explicit ingestion timestamp.
///
/// Validates the input, splits it, and assembles the chunk sequence. An
/// empty or whitespace-only document is invalid input, not a zero-chunk
/// success. Returns data only; writing chunks anywhere is the caller's job.
/// Each call is independent, so distinct documents can be processed on
/// separate tasks without coordination.
pub fn process_at(
    document: &Document,
    config: &SplitConfig,
    created_at: DateTime<Local>,
) -> Result<Vec<Chunk>, PipelineError> {
    if document.text.trim().is_empty() {
        return Err(PipelineError::EmptyDocument(document.source_id.clone()));
    }

    let chars = char_len(&document.text);
    if chars > MAX_DOCUMENT_CHARS {
        return Err(PipelineError::DocumentTooLarge {
            source_id: document.source_id.clone(),
            chars,
            max: MAX_DOCUMENT_CHARS,
        });
    }

    let segments = split(&document.text, config)?;
    Ok(assemble(segments, &document.source_id, created_at))
}
