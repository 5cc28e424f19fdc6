//! Document-store adapters for stored responses and their embeddings.
//!
//! The [`ResponseStore`] trait abstracts the collection operations the
//! pipeline needs — pending-embedding scan, point lookup, replace by
//! identifier, and embedding-filtered similarity search — so the routines
//! work against MongoDB in production and an in-memory double in tests.
//!
//! ```text
//!                  ┌───────────────────┐
//!                  │   ResponseStore   │
//!                  │   (async trait)   │
//!                  └─────────┬─────────┘
//!                            │
//!               ┌────────────┴────────────┐
//!               ▼                         ▼
//!      ┌─────────────────┐      ┌─────────────────┐
//!      │     MongoDB     │      │  test doubles   │
//!      │  $vectorSearch  │      │  (tests/common) │
//!      └─────────────────┘      └─────────────────┘
//! ```

pub mod mongo;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::RespondexError;

pub use mongo::{MongoResponseStore, ResponseDocument};

/// A stored response with its (possibly not yet computed) embedding.
///
/// Backend-agnostic representation: identifiers are plain strings and are
/// converted to the store's native id format at the adapter boundary.
/// Documents are created externally; this system only ever fills in
/// `embedding`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Free-text response, absent or null for incomplete documents.
    pub response: Option<String>,
    /// Embedding vector; empty until the sync routine computes it.
    #[serde(default)]
    pub embedding: Vec<f32>,
    /// Reference key used to scope similarity searches.
    pub line_item_id: String,
}

impl ResponseRecord {
    pub fn new(id: impl Into<String>, line_item_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            response: None,
            embedding: Vec::new(),
            line_item_id: line_item_id.into(),
        }
    }

    /// Set the response text.
    #[must_use]
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Set the embedding vector.
    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    /// A document is eligible for embedding exactly when it has response
    /// text and an empty embedding. Populated embeddings are never
    /// recomputed.
    pub fn needs_embedding(&self) -> bool {
        self.response.is_some() && self.embedding.is_empty()
    }
}

/// One similarity-search hit: response text plus the store's score.
///
/// Ephemeral projection consumed by the summarization routine. The score
/// is carried through the interface but does not influence the
/// summarization prompt.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoredResponse {
    pub response: String,
    pub score: f32,
}

/// Candidate-pool and result-limit knobs for similarity search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// Approximate-search candidate pool handed to the index.
    pub candidates: usize,
    /// Maximum number of scored results returned.
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            candidates: 1000,
            limit: 50,
        }
    }
}

/// Unified interface over response-document storage.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Scan for documents with response text and an empty embedding, in
    /// store-default iteration order.
    async fn pending_embeddings(&self) -> Result<Vec<ResponseRecord>, RespondexError>;

    /// Point lookup by identifier.
    async fn get(&self, id: &str) -> Result<Option<ResponseRecord>, RespondexError>;

    /// Full-document replace keyed by the record's identifier.
    async fn replace(&self, record: &ResponseRecord) -> Result<(), RespondexError>;

    /// Similarity search restricted to documents whose line-item reference
    /// equals `line_item_id`, most similar first, truncated to
    /// [`SearchOptions::limit`].
    async fn search_similar(
        &self,
        line_item_id: &str,
        query_embedding: &[f32],
        options: SearchOptions,
    ) -> Result<Vec<ScoredResponse>, RespondexError>;
}
