use super::*;

#[test]
fn test_batching_small() {
    let batcher = Batcher::new(3);
    let items = vec![
        "chunk1".to_string(),
        "chunk2".to_string(),
        "chunk3".to_string(),
        "chunk4".to_string(),
        "chunk5".to_string(),
    ];

    let batches = batcher.split(&items);
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 3);
    assert_eq!(batches[1].len(), 2);
}

#[test]
fn test_batching_exact_size() {
    let batcher = Batcher::new(5);
    let items = vec!["a".to_string(); 10];

    let batches = batcher.split(&items);
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 5);
    assert_eq!(batches[1].len(), 5);
}

#[test]
fn test_batching_empty() {
    let batcher = Batcher::new(100);
    let items: Vec<String> = vec![];

    let batches = batcher.split(&items);
    assert_eq!(batches.len(), 0);
}

#[test]
fn test_batcher_matches_model_limit() {
    let model = EmbeddingModelInfo::default();
    let batcher = Batcher::for_model(&model);
    assert_eq!(batcher.batch_size, model.max_batch);
}

#[test]
fn test_zero_batch_size_is_clamped() {
    let batcher = Batcher::new(0);
    assert_eq!(batcher.batch_size, 1);
}

#[test]
fn test_model_info_default() {
    let model = EmbeddingModelInfo::default();
    assert_eq!(model.name, "text-embedding-ada-002");
    assert_eq!(model.dim, 1536);
    assert_eq!(model.max_batch, 64);
}

#[test]
fn test_model_info_custom() {
    let model = EmbeddingModelInfo::new("custom-model", 384, 32);
    assert_eq!(model.name, "custom-model");
    assert_eq!(model.dim, 384);
    assert_eq!(model.max_batch, 32);
}

#[tokio::test]
async fn test_client_empty_input() {
    // No server needed: an empty batch short-circuits before any request.
    let client = EmbeddingClient::new("http://localhost:18115");
    let result = client.embed(vec![]).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().len(), 0);
}

// Integration test - requires a live embedding server
#[tokio::test]
#[ignore]
async fn test_client_round_trip() {
    let client = EmbeddingClient::new("http://localhost:18115");
    let texts = vec![
        "## Install\nRun the installer.".to_string(),
        "## Configure\nEdit the config file.".to_string(),
    ];

    let embeddings = client.embed(texts).await.unwrap();
    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0].len(), EmbeddingModelInfo::default().dim);
}

// Integration test - batching against a live server
#[tokio::test]
#[ignore]
async fn test_batched_embedding() {
    let client = EmbeddingClient::new("http://localhost:18115");
    let batcher = Batcher::new(2);

    let texts: Vec<String> = (0..5)
        .map(|i| format!("## Section {i}\nbody {i}"))
        .collect();

    let mut all_embeddings = Vec::new();
    for batch in batcher.split(&texts) {
        let embeddings = client.embed(batch.to_vec()).await.unwrap();
        all_embeddings.extend(embeddings);
    }

    assert_eq!(all_embeddings.len(), 5);
}
