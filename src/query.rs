//! Embedding-filtered similarity query.

use tracing::debug;

use crate::providers::{EmbeddingProvider, InferenceParams, TextGenerator};
use crate::stores::{ResponseStore, ScoredResponse, SearchOptions};
use crate::summarize;
use crate::types::RespondexError;

/// Embed a free-text prompt and run the scoped similarity search.
///
/// Results are restricted to documents whose line-item reference equals
/// `line_item_id`, most similar first, truncated to the configured limit.
pub async fn similarity_query<S, E>(
    store: &S,
    embedder: &E,
    line_item_id: &str,
    prompt: &str,
    options: SearchOptions,
) -> Result<Vec<ScoredResponse>, RespondexError>
where
    S: ResponseStore,
    E: EmbeddingProvider,
{
    let embedded = embedder.embed(prompt).await?;
    let results = store
        .search_similar(line_item_id, &embedded.vector, options)
        .await?;

    debug!(
        scope = %line_item_id,
        hits = results.len(),
        limit = options.limit,
        "similarity query complete"
    );
    Ok(results)
}

/// Similarity query followed by a single summarization call.
///
/// The retrieved response texts are handed to the summarization routine in
/// search order; similarity scores ride along in the result set but are not
/// part of the summarization prompt.
pub async fn query_and_summarize<S, E, G>(
    store: &S,
    embedder: &E,
    generator: &G,
    line_item_id: &str,
    prompt: &str,
) -> Result<String, RespondexError>
where
    S: ResponseStore,
    E: EmbeddingProvider,
    G: TextGenerator,
{
    let results =
        similarity_query(store, embedder, line_item_id, prompt, SearchOptions::default()).await?;
    summarize::summarize(generator, &results, &InferenceParams::default()).await
}
