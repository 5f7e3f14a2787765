use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::chunker::{Chunk, ChunkRecord};

/// SQLite-backed store for chunk records.
///
/// Writes upsert by chunk id, so re-ingesting the same document replaces
/// its rows instead of duplicating them.
pub struct ChunkStore {
    conn: Connection,
}

impl ChunkStore {
    /// Create a new in-memory store
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open (or create) a store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS chunks (
                id TEXT PRIMARY KEY,
                filename TEXT NOT NULL,
                datetime TEXT NOT NULL,
                title TEXT NOT NULL,
                text TEXT NOT NULL,
                size INTEGER NOT NULL,
                chunk_index INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_chunks_filename ON chunks(filename);
            "#,
            )
            .context("Failed to initialize database schema")?;
        Ok(())
    }

    /// Insert a batch of chunks inside one transaction
    pub fn insert_chunks(&mut self, chunks: &[Chunk]) -> Result<()> {
        let tx = self.conn.transaction().context("Failed to start transaction")?;
        for chunk in chunks {
            let record = chunk.record();
            tx.execute(
                "INSERT OR REPLACE INTO chunks (id, filename, datetime, title, text, size, chunk_index) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.filename,
                    record.datetime,
                    record.title,
                    record.text,
                    chunk.size as i64,
                    chunk.index as i64
                ],
            )
            .with_context(|| format!("Failed to insert chunk: {}", chunk.id))?;
        }
        tx.commit().context("Failed to commit chunk batch")?;
        debug!(count = chunks.len(), "inserted chunk batch");
        Ok(())
    }

    /// Get all records for one source document, in document order
    pub fn records_for_source(&self, filename: &str) -> Result<Vec<ChunkRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, filename, datetime, title, text FROM chunks WHERE filename = ?1 ORDER BY chunk_index")
            .context("Failed to prepare statement")?;

        let records = stmt
            .query_map(params![filename], |row| {
                Ok(ChunkRecord {
                    id: row.get(0)?,
                    filename: row.get(1)?,
                    datetime: row.get(2)?,
                    title: row.get(3)?,
                    text: row.get(4)?,
                })
            })
            .context("Failed to query chunks")?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to collect chunks")?;

        Ok(records)
    }

    /// Get a single record by chunk id
    pub fn record(&self, id: &str) -> Result<Option<ChunkRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, filename, datetime, title, text FROM chunks WHERE id = ?1")
            .context("Failed to prepare statement")?;

        let mut rows = stmt.query(params![id]).context("Failed to query chunk")?;
        if let Some(row) = rows.next().context("Failed to get next row")? {
            Ok(Some(ChunkRecord {
                id: row.get(0)?,
                filename: row.get(1)?,
                datetime: row.get(2)?,
                title: row.get(3)?,
                text: row.get(4)?,
            }))
        } else {
            Ok(None)
        }
    }

    /// Total number of stored chunks
    pub fn count(&self) -> Result<u32> {
        self.conn
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))
            .context("Failed to count chunks")
    }
}
