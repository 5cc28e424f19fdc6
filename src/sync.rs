//! Document-to-embedding synchronization.
//!
//! Scans the store for responses that have text but no embedding, embeds
//! each one through the configured provider, and writes the vector back
//! with a full-document replace. Strictly sequential: one document at a
//! time, no batching, no transaction spanning documents. A store failure
//! after document *k* leaves *k* durably updated and the remainder
//! untouched.

use tracing::{info, warn};

use crate::providers::EmbeddingProvider;
use crate::stores::ResponseStore;
use crate::types::RespondexError;

/// Tally of one synchronization pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Documents matched by the pending scan.
    pub scanned: usize,
    /// Documents whose embedding was computed and persisted.
    pub updated: usize,
    /// Documents skipped because the embedding provider failed.
    pub failed: usize,
}

/// Outcome of embedding a single document by identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedOutcome {
    /// The embedding was computed and persisted.
    Updated,
    /// The document already carries an embedding; the provider was not called.
    AlreadyEmbedded,
    /// The document has no response text to embed.
    MissingResponse,
}

/// Embed every pending response and persist the vectors.
///
/// Provider failures skip the affected document (counted in the report);
/// store failures abort the scan, since continuing after a failed write
/// would hide durable divergence.
pub async fn sync_embeddings<S, E>(store: &S, embedder: &E) -> Result<SyncReport, RespondexError>
where
    S: ResponseStore,
    E: EmbeddingProvider,
{
    let pending = store.pending_embeddings().await?;
    let mut report = SyncReport {
        scanned: pending.len(),
        ..SyncReport::default()
    };

    for mut record in pending {
        let Some(text) = record.response.clone() else {
            // The scan filter excludes these; a store double may not.
            continue;
        };

        match embedder.embed(&text).await {
            Ok(output) => {
                record.embedding = output.vector;
                store.replace(&record).await?;
                info!(id = %record.id, tokens = output.token_count, "document updated");
                report.updated += 1;
            }
            Err(err) => {
                warn!(id = %record.id, error = %err, "embedding failed, document skipped");
                report.failed += 1;
            }
        }
    }

    info!(
        scanned = report.scanned,
        updated = report.updated,
        failed = report.failed,
        "embedding sync complete"
    );
    Ok(report)
}

/// Embed one document by identifier.
///
/// Point-lookup variant of [`sync_embeddings`] for reprocessing a single
/// document. Eligibility rules are unchanged: documents without response
/// text or with an existing embedding are reported without invoking the
/// provider.
pub async fn embed_one<S, E>(
    store: &S,
    embedder: &E,
    id: &str,
) -> Result<EmbedOutcome, RespondexError>
where
    S: ResponseStore,
    E: EmbeddingProvider,
{
    let Some(mut record) = store.get(id).await? else {
        return Err(RespondexError::NotFound(id.to_string()));
    };

    if !record.embedding.is_empty() {
        return Ok(EmbedOutcome::AlreadyEmbedded);
    }
    let Some(text) = record.response.clone() else {
        return Ok(EmbedOutcome::MissingResponse);
    };

    let output = embedder.embed(&text).await?;
    record.embedding = output.vector;
    store.replace(&record).await?;
    info!(id = %record.id, tokens = output.token_count, "document updated");

    Ok(EmbedOutcome::Updated)
}
