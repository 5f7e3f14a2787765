use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};

use chunkmill::{
    AppConfig, Batcher, Chunk, ChunkStore, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_SEPARATOR,
    EmbeddingClient, EmbeddingModelInfo, RecordExporter, RunManifest, SplitConfig,
    VectorIndexClient, load_documents, pipeline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Sink {
    /// Write chunk records to the local store and JSON export
    Local,
    /// Embed chunks and upsert them into the remote vector index
    Remote,
    /// Both sinks
    Both,
}

#[derive(Parser)]
#[command(
    name = "chunkmill",
    version,
    about = "Split Markdown documents into bounded, titled chunks for embedding and indexing"
)]
struct Cli {
    /// Markdown file or directory to ingest
    input: PathBuf,

    /// Where the chunks go
    #[arg(long, value_enum, default_value = "local")]
    sink: Sink,

    /// Soft upper bound on chunk size, in characters
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
    max_chunk_size: usize,

    /// Trailing characters duplicated from each chunk into the next
    #[arg(long, default_value_t = 0)]
    overlap: usize,

    /// Separator priority list, highest first (repeatable)
    #[arg(long = "separator")]
    separators: Vec<String>,

    /// Keep separators as chunk prefixes
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    keep_separator: bool,

    /// Directory for exported chunk records and the run manifest
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// SQLite database for the local chunk store
    #[arg(long, default_value = "chunks.sqlite")]
    db: PathBuf,
}

impl Cli {
    fn split_config(&self) -> SplitConfig {
        let separators = if self.separators.is_empty() {
            vec![DEFAULT_SEPARATOR.to_string()]
        } else {
            self.separators.clone()
        };
        SplitConfig {
            max_chunk_size: self.max_chunk_size,
            overlap: self.overlap,
            separators,
            keep_separator: self.keep_separator,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let split_config = cli.split_config();
    let start_time = Instant::now();

    // Step 1: Load documents
    println!("Step 1: Loading Markdown documents from {}...", cli.input.display());
    let documents = load_documents(&cli.input)?;
    println!("✓ Loaded {} document(s)\n", documents.len());

    // Step 2: Chunk each document
    println!("Step 2: Chunking...");
    let mut chunked: Vec<Vec<Chunk>> = Vec::new();
    let mut failures = 0;

    for document in &documents {
        match pipeline::process(document, &split_config) {
            Ok(chunks) => {
                println!(
                    "  Created {} chunks from file '{}'",
                    chunks.len(),
                    document.source_id
                );
                chunked.push(chunks);
            }
            Err(err) => {
                eprintln!("  ✗ Skipping '{}': {}", document.source_id, err);
                failures += 1;
            }
        }
    }

    if chunked.is_empty() {
        bail!("no documents produced chunks ({failures} failed)");
    }
    println!("✓ Chunking complete\n");

    // Step 3: Dispatch to the selected sinks
    if matches!(cli.sink, Sink::Local | Sink::Both) {
        println!("Step 3: Writing chunks locally...");
        write_local(&cli, &chunked)?;
        println!("✓ Local write complete\n");
    }
    if matches!(cli.sink, Sink::Remote | Sink::Both) {
        println!("Step 3: Upserting chunks into the vector index...");
        write_remote(&config, &chunked).await?;
        println!("✓ Remote upsert complete\n");
    }

    // Statistics
    let total_chunks: usize = chunked.iter().map(Vec::len).sum();
    let total_chars: usize = chunked.iter().flatten().map(|c| c.size).sum();

    println!("=== Run Statistics ===");
    println!("Documents:        {}", chunked.len());
    println!("Failed documents: {}", failures);
    println!("Total chunks:     {}", total_chunks);
    println!("Total characters: {}", total_chars);
    println!(
        "Avg chunk size:   {:.1}",
        if total_chunks > 0 {
            total_chars as f64 / total_chunks as f64
        } else {
            0.0
        }
    );
    println!("Elapsed:          {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}

fn write_local(cli: &Cli, chunked: &[Vec<Chunk>]) -> Result<()> {
    let mut store = ChunkStore::open(&cli.db)?;
    let exporter = RecordExporter::new(&cli.output);

    for chunks in chunked {
        store.insert_chunks(chunks)?;
        let source_id = &chunks[0].source_id;
        let path = exporter.write_records(source_id, chunks)?;
        println!("  {} -> {}", source_id, path.display());
    }

    let total_chunks: usize = chunked.iter().map(Vec::len).sum();
    let total_chars: usize = chunked.iter().flatten().map(|c| c.size).sum();
    let manifest = RunManifest::new(chunked.len(), total_chunks, total_chars);
    let manifest_path = exporter.write_manifest(&manifest)?;
    println!("  manifest -> {}", manifest_path.display());

    Ok(())
}

async fn write_remote(config: &AppConfig, chunked: &[Vec<Chunk>]) -> Result<()> {
    let index_endpoint = config
        .index_endpoint
        .as_deref()
        .context("VECTOR_INDEX_ENDPOINT must be set for the remote sink")?;

    let mut embedder = EmbeddingClient::new(&config.embedding_endpoint);
    if let Some(api_key) = &config.embedding_api_key {
        embedder = embedder.with_api_key(api_key);
    }
    let mut index = VectorIndexClient::new(index_endpoint, &config.index_namespace);
    if let Some(api_key) = &config.index_api_key {
        index = index.with_api_key(api_key);
    }

    let model = EmbeddingModelInfo::default();
    let batcher = Batcher::for_model(&model);

    for chunks in chunked {
        let source_id = &chunks[0].source_id;
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();

        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in batcher.split(&texts) {
            let batch_embeddings = embedder
                .embed(batch.to_vec())
                .await
                .with_context(|| format!("embedding failed for '{source_id}'"))?;
            embeddings.extend(batch_embeddings);
        }

        let upserted = index
            .upsert_with_retry(chunks, &embeddings)
            .await
            .with_context(|| format!("upsert failed for '{source_id}'"))?;
        println!("  {} -> {} vectors upserted", source_id, upserted);
    }

    Ok(())
}
