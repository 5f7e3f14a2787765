// batcher.rs - keeps embedding requests inside the model's batch limit
use super::model::EmbeddingModelInfo;

pub struct Batcher {
    pub batch_size: usize,
}

impl Batcher {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    /// Size batches to what the model accepts per request
    pub fn for_model(model: &EmbeddingModelInfo) -> Self {
        Self::new(model.max_batch)
    }

    pub fn split<'a>(&self, items: &'a [String]) -> Vec<&'a [String]> {
        items.chunks(self.batch_size).collect()
    }
}
