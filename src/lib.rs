//! Embedding synchronization and similarity search over stored responses.
//!
//! ```text
//! Pending responses ──► sync::sync_embeddings ──► EmbeddingProvider (Titan)
//!         │                        │
//!         │                        └──► ResponseStore::replace (vector persisted)
//!         ▼
//! query::similarity_query ──► ResponseStore::search_similar ($vectorSearch)
//!         │
//!         └──► summarize::summarize ──► TextGenerator (Converse) ──► summary
//! ```
//!
//! The store and provider handles are constructed once and passed by
//! reference into each routine, so every routine runs equally well against
//! the MongoDB/Bedrock adapters or the in-crate mocks.

pub mod config;
pub mod providers;
pub mod query;
pub mod stores;
pub mod summarize;
pub mod sync;
pub mod types;

pub use config::Settings;
pub use providers::{EmbeddingOutput, EmbeddingProvider, InferenceParams, TextGenerator};
pub use stores::{ResponseRecord, ResponseStore, ScoredResponse, SearchOptions};
pub use types::RespondexError;
