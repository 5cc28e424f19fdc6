//! Shared error type for the respondex pipeline.

use thiserror::Error;

/// Errors surfaced by the respondex routines and adapters.
///
/// Adapters map driver and SDK failures into these variants at their own
/// boundary; the routines propagate them with `?` and let the caller decide
/// whether to skip, abort, or retry. Nothing in the library converts a
/// failure into an absent value or terminates the process.
#[derive(Debug, Error)]
pub enum RespondexError {
    /// A required configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Document store operation failed.
    #[error("store error: {0}")]
    Store(String),

    /// A managed provider (embedding or text generation) rejected the call.
    #[error("provider error ({provider}): {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// An identifier could not be parsed into the store's id format.
    #[error("invalid identifier '{0}'")]
    InvalidId(String),

    /// No document exists under the given identifier.
    #[error("document '{0}' not found")]
    NotFound(String),

    /// JSON serialization/deserialization error.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
