use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::splitter::char_len;
use super::title::extract_title;

/// Timestamp layout used in persisted and exported records
pub const RECORD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A bounded, titled, identified unit of a document's text.
///
/// Built once by [`assemble`] and never mutated afterwards. `size` is the
/// character count of `text`, overlap prefixes included.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Deterministic id: `{source_id}_{NNN}`, zero-padded 3-digit, 1-based
    pub id: String,
    /// Source document this chunk came from, typically its filename
    pub source_id: String,
    /// 0-based position within the source document
    pub index: usize,
    /// Title inferred from the chunk's first line
    pub title: String,
    /// The chunk's text content
    pub text: String,
    /// Character count of `text`
    pub size: usize,
    /// Ingestion timestamp, shared by all chunks of one document
    pub created_at: DateTime<Local>,
}

/// Persisted/exported form of a chunk, field names wire-exact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub filename: String,
    pub datetime: String,
    pub title: String,
    pub text: String,
}

/// Descriptive metadata sent to a vector index without the full text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub filename: String,
    pub datetime: String,
    pub title: String,
}

impl Chunk {
    /// Project into the exported record form
    pub fn record(&self) -> ChunkRecord {
        ChunkRecord {
            id: self.id.clone(),
            filename: self.source_id.clone(),
            datetime: self.datetime(),
            title: self.title.clone(),
            text: self.text.clone(),
        }
    }

    /// Project into index metadata, omitting the text
    pub fn index_metadata(&self) -> IndexMetadata {
        IndexMetadata {
            filename: self.source_id.clone(),
            datetime: self.datetime(),
            title: self.title.clone(),
        }
    }

    fn datetime(&self) -> String {
        self.created_at.format(RECORD_TIME_FORMAT).to_string()
    }
}

/// Turn a document's segments into complete chunks.
///
/// One chunk per segment, in segment order. Ids are unique within a
/// `source_id` by construction (monotonically increasing zero-padded
/// counter); collisions across different sources are the caller's
/// namespacing concern.
pub fn assemble(
    segments: Vec<String>,
    source_id: &str,
    created_at: DateTime<Local>,
) -> Vec<Chunk> {
    segments
        .into_iter()
        .enumerate()
        .map(|(index, text)| Chunk {
            id: format!("{}_{:03}", source_id, index + 1),
            source_id: source_id.to_string(),
            index,
            title: extract_title(&text),
            size: char_len(&text),
            text,
            created_at,
        })
        .collect()
}
