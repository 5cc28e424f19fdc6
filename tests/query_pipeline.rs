//! Integration tests for the similarity query and summarization flow.

mod common;

use common::InMemoryResponseStore;
use respondex::providers::{EMBEDDING_DIM, MockEmbeddingProvider, MockTextGenerator};
use respondex::query;
use respondex::stores::{ScoredResponse, SearchOptions};

fn scored(response: &str, score: f32) -> ScoredResponse {
    ScoredResponse {
        response: response.to_string(),
        score,
    }
}

#[tokio::test]
async fn query_is_scoped_to_the_requested_line_item() {
    let store = InMemoryResponseStore::new();
    store.seed_hits("L1", vec![scored("in scope", 0.9)]);
    store.seed_hits("L2", vec![scored("out of scope", 0.8)]);
    let embedder = MockEmbeddingProvider::new();

    let results = query::similarity_query(
        &store,
        &embedder,
        "L1",
        "anything relevant",
        SearchOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].response, "in scope");

    let searches = store.searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].line_item_id, "L1");
    assert_eq!(searches[0].vector_len, EMBEDDING_DIM);
    assert_eq!(searches[0].options, SearchOptions::default());
}

#[tokio::test]
async fn results_beyond_the_limit_are_truncated() {
    let store = InMemoryResponseStore::new();
    let hits: Vec<ScoredResponse> = (0..60)
        .map(|i| scored(&format!("hit {i}"), 1.0 - (i as f32) / 100.0))
        .collect();
    store.seed_hits("L1", hits);
    let embedder = MockEmbeddingProvider::new();

    let results = query::similarity_query(
        &store,
        &embedder,
        "L1",
        "broad prompt",
        SearchOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 50);
    assert_eq!(results[0].response, "hit 0");
}

#[tokio::test]
async fn end_to_end_two_hits_reach_the_generator_newline_joined() {
    let store = InMemoryResponseStore::new();
    store.seed_hits(
        "L1",
        vec![scored("first snippet", 0.95), scored("second snippet", 0.72)],
    );
    let embedder = MockEmbeddingProvider::new();
    let generator = MockTextGenerator::new("a tidy summary");

    let summary = query::query_and_summarize(
        &store,
        &embedder,
        &generator,
        "L1",
        "what did people say?",
    )
    .await
    .unwrap();

    assert_eq!(summary, "a tidy summary");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1, "exactly one summarization call");
    assert!(prompts[0].contains("first snippet\nsecond snippet"));
    assert!(
        !prompts[0].contains("0.95"),
        "similarity scores stay out of the prompt"
    );
}

#[tokio::test]
async fn embedding_failure_propagates_to_the_caller() {
    let store = InMemoryResponseStore::new();
    let embedder = MockEmbeddingProvider::new().failing_on("doomed prompt");

    let err = query::similarity_query(
        &store,
        &embedder,
        "L1",
        "doomed prompt",
        SearchOptions::default(),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("provider error"));
    assert!(store.searches().is_empty(), "no search without an embedding");
}
