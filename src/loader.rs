use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::pipeline::Document;

const MARKDOWN_EXTENSION: &str = "md";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("not a Markdown (.md) file: {0}")]
    NotMarkdown(PathBuf),

    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no Markdown files found under {0}")]
    NoDocuments(PathBuf),
}

/// Load a single Markdown file into a [`Document`].
///
/// Only `.md` files are accepted. The document's `source_id` is the file's
/// basename, so chunk ids stay stable wherever the file lives on disk.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    if !is_markdown(path) {
        return Err(LoadError::NotMarkdown(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let source_id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!(source_id = %source_id, bytes = text.len(), "loaded document");
    Ok(Document { source_id, text })
}

/// Load every Markdown file at `input`.
///
/// A file path loads that one document (failing loudly on a bad file); a
/// directory is walked recursively in path order, unreadable entries are
/// logged and skipped, and non-`.md` files are ignored. Finding nothing to
/// load is an error rather than an empty run.
pub fn load_documents(input: &Path) -> Result<Vec<Document>, LoadError> {
    if !input.exists() {
        return Err(LoadError::NotFound(input.to_path_buf()));
    }

    if input.is_file() {
        return Ok(vec![load_document(input)?]);
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        match load_document(entry.path()) {
            Ok(document) => documents.push(document),
            Err(err) => warn!(path = %entry.path().display(), error = %err, "skipping file"),
        }
    }

    if documents.is_empty() {
        return Err(LoadError::NoDocuments(input.to_path_buf()));
    }
    Ok(documents)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
        .unwrap_or(false)
}
