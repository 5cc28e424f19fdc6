//! Integration tests for the embedding synchronization routine against the
//! in-memory store double and mock providers.

mod common;

use common::InMemoryResponseStore;
use respondex::providers::{EMBEDDING_DIM, MockEmbeddingProvider};
use respondex::stores::ResponseRecord;
use respondex::sync::{self, EmbedOutcome};
use respondex::types::RespondexError;

fn pending(id: &str, text: &str) -> ResponseRecord {
    ResponseRecord::new(id, "aaaaaaaaaaaaaaaaaaaaaaaa").with_response(text)
}

#[tokio::test]
async fn pending_documents_get_full_dimension_embeddings() {
    let store = InMemoryResponseStore::new();
    store.seed(pending("d1", "first response"));
    store.seed(pending("d2", "second response"));
    let embedder = MockEmbeddingProvider::new();

    let report = sync::sync_embeddings(&store, &embedder).await.unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(report.updated, 2);
    assert_eq!(report.failed, 0);
    for id in ["d1", "d2"] {
        let record = store.record(id).unwrap();
        assert_eq!(record.embedding.len(), EMBEDDING_DIM);
    }
}

#[tokio::test]
async fn already_embedded_documents_are_untouched() {
    let store = InMemoryResponseStore::new();
    let existing = vec![0.5; 4];
    store.seed(
        ResponseRecord::new("synced", "aaaaaaaaaaaaaaaaaaaaaaaa")
            .with_response("already embedded")
            .with_embedding(existing.clone()),
    );
    store.seed(pending("fresh", "needs a vector"));
    let embedder = MockEmbeddingProvider::new();

    let report = sync::sync_embeddings(&store, &embedder).await.unwrap();

    assert_eq!(report.scanned, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(
        embedder.calls(),
        vec!["needs a vector"],
        "only the pending document may reach the provider"
    );
    assert_eq!(store.record("synced").unwrap().embedding, existing);
}

#[tokio::test]
async fn provider_failure_skips_the_document() {
    let store = InMemoryResponseStore::new();
    store.seed(pending("bad", "poison text"));
    store.seed(pending("good", "fine text"));
    let embedder = MockEmbeddingProvider::new().failing_on("poison text");

    let report = sync::sync_embeddings(&store, &embedder).await.unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(report.updated, 1);
    assert_eq!(report.failed, 1);
    assert!(
        store.record("bad").unwrap().embedding.is_empty(),
        "failed document must stay pending"
    );
    assert!(!store.record("good").unwrap().embedding.is_empty());
}

#[tokio::test]
async fn end_to_end_stub_vector_is_persisted_verbatim() {
    let store = InMemoryResponseStore::new();
    store.seed(
        ResponseRecord::new("d1", "L1-0000000000000000000000").with_response("hello world"),
    );
    let stub_vector: Vec<f32> = (0..EMBEDDING_DIM).map(|i| (i as f32) * 0.1).collect();
    let embedder = MockEmbeddingProvider::new().with_fixed_vector(stub_vector.clone());

    let report = sync::sync_embeddings(&store, &embedder).await.unwrap();

    assert_eq!(report.updated, 1);
    let stored = store.record("d1").unwrap();
    assert_eq!(stored.embedding, stub_vector);
    assert_eq!(stored.response.as_deref(), Some("hello world"));
}

#[tokio::test]
async fn embed_one_updates_a_single_pending_document() {
    let store = InMemoryResponseStore::new();
    store.seed(pending("solo", "just this one"));
    let embedder = MockEmbeddingProvider::new();

    let outcome = sync::embed_one(&store, &embedder, "solo").await.unwrap();

    assert_eq!(outcome, EmbedOutcome::Updated);
    assert_eq!(store.record("solo").unwrap().embedding.len(), EMBEDDING_DIM);
}

#[tokio::test]
async fn embed_one_reports_ineligible_documents_without_calling_the_provider() {
    let store = InMemoryResponseStore::new();
    store.seed(
        ResponseRecord::new("done", "aaaaaaaaaaaaaaaaaaaaaaaa")
            .with_response("text")
            .with_embedding(vec![1.0]),
    );
    store.seed(ResponseRecord::new("empty", "aaaaaaaaaaaaaaaaaaaaaaaa"));
    let embedder = MockEmbeddingProvider::new();

    assert_eq!(
        sync::embed_one(&store, &embedder, "done").await.unwrap(),
        EmbedOutcome::AlreadyEmbedded
    );
    assert_eq!(
        sync::embed_one(&store, &embedder, "empty").await.unwrap(),
        EmbedOutcome::MissingResponse
    );
    assert!(embedder.calls().is_empty());

    let err = sync::embed_one(&store, &embedder, "missing").await.unwrap_err();
    assert!(matches!(err, RespondexError::NotFound(_)));
}
