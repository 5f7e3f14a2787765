/// Infer a title from a chunk of Markdown.
///
/// Takes the first non-blank line and strips a leading run of `#` markers
/// plus any whitespace after them. A first line without a heading marker is
/// returned trimmed, as-is: body text standing in for a title is the
/// intended fallback, not an error.
pub fn extract_title(segment_text: &str) -> String {
    let first_line = segment_text.trim().lines().next().unwrap_or("");
    first_line.trim_start_matches('#').trim().to_string()
}
