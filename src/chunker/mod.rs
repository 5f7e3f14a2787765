mod assembler;
mod splitter;
mod title;

#[cfg(test)]
mod tests;

pub use assembler::{Chunk, ChunkRecord, IndexMetadata, RECORD_TIME_FORMAT, assemble};
pub use splitter::{SplitConfig, SplitError, split};
pub use title::extract_title;

pub(crate) use splitter::char_len;

/// Default bound on chunk size, in characters (configurable)
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1500;

/// Default highest-priority separator: Markdown second-level headings
pub const DEFAULT_SEPARATOR: &str = "##";
