use thiserror::Error;

/// Errors raised by an unusable split configuration
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("max_chunk_size must be greater than zero")]
    ZeroChunkSize,

    #[error("separator priority list must not be empty")]
    NoSeparators,
}

/// Configuration for boundary-aware splitting
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Soft upper bound on chunk length, in characters
    pub max_chunk_size: usize,
    /// Trailing characters of each chunk duplicated into the next one
    pub overlap: usize,
    /// Separator strings in priority order, highest first
    pub separators: Vec<String>,
    /// Keep each separator as a prefix of the segment it introduces
    pub keep_separator: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: super::DEFAULT_MAX_CHUNK_SIZE,
            overlap: 0,
            separators: vec![super::DEFAULT_SEPARATOR.to_string()],
            keep_separator: true,
        }
    }
}

impl SplitConfig {
    /// Reject configurations the splitter cannot honor
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.max_chunk_size == 0 {
            return Err(SplitError::ZeroChunkSize);
        }
        if self.separators.is_empty() {
            return Err(SplitError::NoSeparators);
        }
        Ok(())
    }
}

/// Length in characters, not bytes. Sizes and bounds all use this so
/// multi-byte text never splits inside a code point.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split `text` into an ordered sequence of chunks.
///
/// Chunk boundaries fall at every occurrence of the highest-priority
/// separator. A segment that alone exceeds `max_chunk_size` is subdivided
/// with the remaining separators in priority order, then by whitespace, then
/// by a hard character cut; sub-pieces are greedily re-merged up to the
/// bound. A piece that cannot be subdivided any further is emitted as-is
/// rather than dropped, so the bound is a soft ceiling.
///
/// With `keep_separator` and zero overlap, concatenating the output
/// reproduces `text` exactly. The function is pure: identical input yields
/// identical output.
pub fn split(text: &str, config: &SplitConfig) -> Result<Vec<String>, SplitError> {
    config.validate()?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut chunks = Vec::new();
    for segment in split_on_separator(text, &config.separators[0], config.keep_separator) {
        if char_len(&segment) <= config.max_chunk_size {
            chunks.push(segment);
        } else {
            subdivide(&segment, &config.separators[1..], config, &mut chunks);
        }
    }

    // Separator-only input with keep_separator=false can drop every segment.
    // Never emit nothing for non-empty input.
    if chunks.is_empty() {
        chunks.push(text.to_string());
    }

    if config.overlap > 0 {
        apply_overlap(&mut chunks, config.overlap);
    }

    Ok(chunks)
}

/// Split on every occurrence of `separator`, keeping the separator attached
/// to the segment it introduces when `keep_separator` is set. Text before
/// the first occurrence becomes a leading segment with no prefix.
fn split_on_separator(text: &str, separator: &str, keep_separator: bool) -> Vec<String> {
    if separator.is_empty() {
        return vec![text.to_string()];
    }

    let mut parts = text.split(separator);
    let mut segments = Vec::new();

    if let Some(leading) = parts.next() {
        if !leading.is_empty() {
            segments.push(leading.to_string());
        }
    }

    for part in parts {
        if keep_separator {
            segments.push(format!("{separator}{part}"));
        } else if !part.is_empty() {
            segments.push(part.to_string());
        }
    }

    segments
}

/// Break an oversized segment down with the remaining separators, greedily
/// re-merging consecutive sub-pieces while the accumulator stays within the
/// bound. Falls through to [`whitespace_split`] when no separator remains.
fn subdivide(text: &str, separators: &[String], config: &SplitConfig, out: &mut Vec<String>) {
    let Some(separator) = separators.first() else {
        whitespace_split(text, config.max_chunk_size, out);
        return;
    };

    let pieces = split_on_separator(text, separator, config.keep_separator);
    if pieces.len() <= 1 {
        // Separator absent here; try the next priority level.
        subdivide(text, &separators[1..], config, out);
        return;
    }

    let mut acc = String::new();
    for piece in pieces {
        let piece_len = char_len(&piece);

        if piece_len > config.max_chunk_size {
            if !acc.is_empty() {
                out.push(std::mem::take(&mut acc));
            }
            subdivide(&piece, &separators[1..], config, out);
            continue;
        }

        if !acc.is_empty() && char_len(&acc) + piece_len > config.max_chunk_size {
            out.push(std::mem::take(&mut acc));
        }
        acc.push_str(&piece);
    }

    if !acc.is_empty() {
        out.push(acc);
    }
}

/// Last-resort subdivision: merge whitespace-delimited runs up to the bound,
/// hard-cutting any single run that is longer than the bound by itself.
fn whitespace_split(text: &str, max_chunk_size: usize, out: &mut Vec<String>) {
    let mut acc = String::new();
    for piece in text.split_inclusive(char::is_whitespace) {
        let piece_len = char_len(piece);

        if piece_len > max_chunk_size {
            if !acc.is_empty() {
                out.push(std::mem::take(&mut acc));
            }
            hard_split(piece, max_chunk_size, out);
            continue;
        }

        if !acc.is_empty() && char_len(&acc) + piece_len > max_chunk_size {
            out.push(std::mem::take(&mut acc));
        }
        acc.push_str(piece);
    }

    if !acc.is_empty() {
        out.push(acc);
    }
}

/// Cut every `max_chunk_size` characters, on character boundaries.
fn hard_split(text: &str, max_chunk_size: usize, out: &mut Vec<String>) {
    let mut buf = String::new();
    let mut count = 0;
    for ch in text.chars() {
        buf.push(ch);
        count += 1;
        if count == max_chunk_size {
            out.push(std::mem::take(&mut buf));
            count = 0;
        }
    }
    if !buf.is_empty() {
        out.push(buf);
    }
}

/// Prefix each chunk after the first with the trailing `overlap` characters
/// of its predecessor. The duplication is intentional and counts toward the
/// prefixed chunk's size.
fn apply_overlap(chunks: &mut [String], overlap: usize) {
    let tails: Vec<String> = chunks
        .iter()
        .map(|chunk| {
            let len = char_len(chunk);
            chunk.chars().skip(len.saturating_sub(overlap)).collect()
        })
        .collect();

    for i in 1..chunks.len() {
        chunks[i] = format!("{}{}", tails[i - 1], chunks[i]);
    }
}
