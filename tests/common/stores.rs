use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use respondex::stores::{ResponseRecord, ResponseStore, ScoredResponse, SearchOptions};
use respondex::types::RespondexError;

/// Arguments of one recorded `search_similar` call.
#[derive(Clone, Debug)]
pub struct RecordedSearch {
    pub line_item_id: String,
    pub vector_len: usize,
    pub options: SearchOptions,
}

/// In-memory [`ResponseStore`] double.
///
/// Documents live in insertion order; similarity hits are canned per scope
/// since nearest-neighbor ranking belongs to the real store.
#[derive(Default)]
pub struct InMemoryResponseStore {
    records: Mutex<Vec<ResponseRecord>>,
    canned_hits: Mutex<HashMap<String, Vec<ScoredResponse>>>,
    searches: Mutex<Vec<RecordedSearch>>,
}

impl InMemoryResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document as the external producer would.
    #[allow(dead_code)]
    pub fn seed(&self, record: ResponseRecord) {
        self.records.lock().push(record);
    }

    /// Configure the scored hits a scope's similarity search returns.
    #[allow(dead_code)]
    pub fn seed_hits(&self, line_item_id: impl Into<String>, hits: Vec<ScoredResponse>) {
        self.canned_hits.lock().insert(line_item_id.into(), hits);
    }

    /// Current state of one document, if present.
    #[allow(dead_code)]
    pub fn record(&self, id: &str) -> Option<ResponseRecord> {
        self.records.lock().iter().find(|r| r.id == id).cloned()
    }

    /// Every similarity search issued against this store.
    #[allow(dead_code)]
    pub fn searches(&self) -> Vec<RecordedSearch> {
        self.searches.lock().clone()
    }
}

#[async_trait]
impl ResponseStore for InMemoryResponseStore {
    async fn pending_embeddings(&self) -> Result<Vec<ResponseRecord>, RespondexError> {
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|record| record.needs_embedding())
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<ResponseRecord>, RespondexError> {
        Ok(self.record(id))
    }

    async fn replace(&self, record: &ResponseRecord) -> Result<(), RespondexError> {
        let mut records = self.records.lock();
        let Some(slot) = records.iter_mut().find(|r| r.id == record.id) else {
            return Err(RespondexError::NotFound(record.id.clone()));
        };
        *slot = record.clone();
        Ok(())
    }

    async fn search_similar(
        &self,
        line_item_id: &str,
        query_embedding: &[f32],
        options: SearchOptions,
    ) -> Result<Vec<ScoredResponse>, RespondexError> {
        self.searches.lock().push(RecordedSearch {
            line_item_id: line_item_id.to_string(),
            vector_len: query_embedding.len(),
            options,
        });

        let mut hits = self
            .canned_hits
            .lock()
            .get(line_item_id)
            .cloned()
            .unwrap_or_default();
        hits.truncate(options.limit);
        Ok(hits)
    }
}
