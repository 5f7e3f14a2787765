use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::chunker::{Chunk, ChunkRecord};

/// Top-level description of one export run
#[derive(Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub created_at: String,
    pub generator: String,
    pub stats: RunStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunStats {
    pub document_count: usize,
    pub chunk_count: usize,
    pub total_chars: usize,
}

impl RunManifest {
    pub fn new(document_count: usize, chunk_count: usize, total_chars: usize) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            generator: format!("chunkmill v{}", env!("CARGO_PKG_VERSION")),
            stats: RunStats {
                document_count,
                chunk_count,
                total_chars,
            },
        }
    }
}

/// Writes chunk records and the run manifest as JSON under one directory
pub struct RecordExporter {
    output_dir: PathBuf,
}

impl RecordExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write one source document's records to `{source_id}_chunks.json`
    pub fn write_records(&self, source_id: &str, chunks: &[Chunk]) -> Result<PathBuf> {
        let records: Vec<ChunkRecord> = chunks.iter().map(Chunk::record).collect();
        let path = self.output_dir.join(format!("{source_id}_chunks.json"));
        self.write_json(&path, &records)?;
        info!(source_id = %source_id, count = records.len(), path = %path.display(), "exported chunk records");
        Ok(path)
    }

    /// Write the run manifest to `manifest.json`
    pub fn write_manifest(&self, manifest: &RunManifest) -> Result<PathBuf> {
        let path = self.output_dir.join("manifest.json");
        self.write_json(&path, manifest)?;
        Ok(path)
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory: {}", self.output_dir.display())
        })?;
        let json = serde_json::to_string_pretty(value).context("Failed to serialize records")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::{SplitConfig, assemble, split};
    use chrono::{Local, TimeZone};

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("chunkmill-export-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_records_are_wire_exact() {
        let segments = split("## A\nBody A\n## B\nBody B", &SplitConfig::default()).unwrap();
        let created_at = Local.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let chunks = assemble(segments, "doc.md", created_at);

        let dir = scratch_dir();
        let exporter = RecordExporter::new(&dir);
        let path = exporter.write_records("doc.md", &chunks).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value.as_array().unwrap()[0];
        let mut keys: Vec<&str> = first.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();

        assert_eq!(keys, vec!["datetime", "filename", "id", "text", "title"]);
        assert_eq!(first["id"], "doc.md_001");
        assert_eq!(first["filename"], "doc.md");
        assert_eq!(first["datetime"], "2024-03-01 12:30:05");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_manifest_counts() {
        let manifest = RunManifest::new(2, 7, 4200);
        assert_eq!(manifest.stats.document_count, 2);
        assert_eq!(manifest.stats.chunk_count, 7);
        assert!(manifest.generator.starts_with("chunkmill v"));

        let dir = scratch_dir();
        let path = RecordExporter::new(&dir).write_manifest(&manifest).unwrap();
        let reloaded: RunManifest =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reloaded.run_id, manifest.run_id);

        fs::remove_dir_all(&dir).unwrap();
    }
}
