//! Managed-provider adapters for embedding generation and text generation.
//!
//! Both capabilities sit behind traits so the routines in [`crate::sync`],
//! [`crate::query`], and [`crate::summarize`] can run against the Bedrock
//! runtime in production and the deterministic mocks in tests. Failures are
//! returned as [`RespondexError`] values, never swallowed into an absent
//! result.

pub mod bedrock;
pub mod mock;

use async_trait::async_trait;

use crate::types::RespondexError;

pub use bedrock::BedrockProvider;
pub use mock::{MockEmbeddingProvider, MockTextGenerator};

/// Dimensionality of the Titan text-embedding model.
pub const EMBEDDING_DIM: usize = 1536;

/// Result of a single embedding call.
#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddingOutput {
    /// Fixed-length vector representation of the input text.
    pub vector: Vec<f32>,
    /// Token count the provider reported for the input text.
    pub token_count: u32,
}

/// Decoding parameters for a single-turn generation request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InferenceParams {
    pub max_tokens: i32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for InferenceParams {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: 0.5,
            top_p: 0.9,
        }
    }
}

/// Remote embedding-generation endpoint.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed arbitrary input text into a fixed-length vector.
    async fn embed(&self, input_text: &str) -> Result<EmbeddingOutput, RespondexError>;
}

/// Remote single-turn text-generation endpoint.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one user-role prompt and return the generated text.
    async fn generate(
        &self,
        prompt: &str,
        params: &InferenceParams,
    ) -> Result<String, RespondexError>;
}
