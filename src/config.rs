//! Environment-sourced settings for the store and provider adapters.
//!
//! A `.env` file is honored when present (`dotenvy`); construction fails
//! with a [`RespondexError::Config`] naming the first missing variable.

use crate::types::RespondexError;

/// Default database holding the response collection.
pub const DEFAULT_DATABASE: &str = "sample_responses";
/// Default collection of unstructured responses.
pub const DEFAULT_COLLECTION: &str = "unstructured";
/// Default Atlas vector-search index name.
pub const DEFAULT_VECTOR_INDEX: &str = "response_vector";
/// Default Bedrock embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "amazon.titan-embed-text-v1";
/// Default Bedrock text-generation model.
pub const DEFAULT_TEXT_MODEL: &str = "amazon.titan-text-premier-v1:0";

/// Connection and model configuration gathered from the environment.
#[derive(Clone, Debug)]
pub struct Settings {
    /// MongoDB connection string (`MONGO_URI`).
    pub mongo_uri: String,
    /// Database name, `RESPONDEX_DATABASE` or [`DEFAULT_DATABASE`].
    pub database: String,
    /// Collection name, `RESPONDEX_COLLECTION` or [`DEFAULT_COLLECTION`].
    pub collection: String,
    /// Vector index name, `RESPONDEX_VECTOR_INDEX` or [`DEFAULT_VECTOR_INDEX`].
    pub vector_index: String,
    /// AWS region for the Bedrock runtime (`AWS_REGION`).
    pub aws_region: String,
    /// Static access key (`AWS_ACCESS_KEY`); default credential chain when unset.
    pub aws_access_key: Option<String>,
    /// Static secret key (`AWS_SECRET_ACCESS_KEY`); paired with the access key.
    pub aws_secret_access_key: Option<String>,
    /// Embedding model id, `RESPONDEX_EMBEDDING_MODEL` or [`DEFAULT_EMBEDDING_MODEL`].
    pub embedding_model_id: String,
    /// Text model id, `RESPONDEX_TEXT_MODEL` or [`DEFAULT_TEXT_MODEL`].
    pub text_model_id: String,
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first.
    pub fn from_env() -> Result<Self, RespondexError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings through an arbitrary variable lookup.
    ///
    /// The lookup indirection keeps construction testable without mutating
    /// process-wide environment state.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, RespondexError> {
        let require = |name: &str| {
            lookup(name).ok_or_else(|| {
                RespondexError::Config(format!("environment variable {name} is not set"))
            })
        };
        let or_default = |name: &str, default: &str| {
            lookup(name).unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            mongo_uri: require("MONGO_URI")?,
            database: or_default("RESPONDEX_DATABASE", DEFAULT_DATABASE),
            collection: or_default("RESPONDEX_COLLECTION", DEFAULT_COLLECTION),
            vector_index: or_default("RESPONDEX_VECTOR_INDEX", DEFAULT_VECTOR_INDEX),
            aws_region: require("AWS_REGION")?,
            aws_access_key: lookup("AWS_ACCESS_KEY"),
            aws_secret_access_key: lookup("AWS_SECRET_ACCESS_KEY"),
            embedding_model_id: or_default("RESPONDEX_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            text_model_id: or_default("RESPONDEX_TEXT_MODEL", DEFAULT_TEXT_MODEL),
        })
    }
}
