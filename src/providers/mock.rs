//! Deterministic mock providers for CI and offline testing.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{EMBEDDING_DIM, EmbeddingOutput, EmbeddingProvider, InferenceParams, TextGenerator};
use crate::types::RespondexError;

/// Embedding provider returning hash-seeded vectors.
///
/// The same input always produces the same vector, so tests comparing
/// stored and recomputed embeddings stay deterministic. Every input is
/// recorded, which lets tests assert that already-synced documents never
/// reach the provider.
pub struct MockEmbeddingProvider {
    dimensions: usize,
    fixed: Option<Vec<f32>>,
    fail_inputs: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self {
            dimensions: EMBEDDING_DIM,
            fixed: None,
            fail_inputs: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Override the vector dimensionality (default 1536).
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Return this exact vector for every input instead of a hashed one.
    #[must_use]
    pub fn with_fixed_vector(mut self, vector: Vec<f32>) -> Self {
        self.fixed = Some(vector);
        self
    }

    /// Fail with a provider error whenever this exact input is embedded.
    #[must_use]
    pub fn failing_on(mut self, input: impl Into<String>) -> Self {
        self.fail_inputs.insert(input.into());
        self
    }

    /// Inputs seen so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn hashed_vector(&self, input: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        input.hash(&mut hasher);
        let mut state = hasher.finish() | 1;

        (0..self.dimensions)
            .map(|_| {
                // Simple LCG stream seeded by the input hash.
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0) as f32
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, input_text: &str) -> Result<EmbeddingOutput, RespondexError> {
        self.calls.lock().push(input_text.to_string());

        if self.fail_inputs.contains(input_text) {
            return Err(RespondexError::Provider {
                provider: "mock",
                message: format!("configured to fail for input '{input_text}'"),
            });
        }

        let vector = match &self.fixed {
            Some(fixed) => fixed.clone(),
            None => self.hashed_vector(input_text),
        };

        Ok(EmbeddingOutput {
            vector,
            token_count: input_text.split_whitespace().count() as u32,
        })
    }
}

/// Text generator returning a canned reply and recording every prompt.
pub struct MockTextGenerator {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new("mock summary")
    }
}

impl MockTextGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _params: &InferenceParams,
    ) -> Result<String, RespondexError> {
        self.prompts.lock().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}
