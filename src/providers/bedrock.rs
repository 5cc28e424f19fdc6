//! Bedrock runtime adapter: Titan embeddings via `InvokeModel`, text
//! generation via the Converse API.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::config::Credentials;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message,
};
use aws_smithy_types::Blob;
use aws_smithy_types::error::display::DisplayErrorContext;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EmbeddingOutput, EmbeddingProvider, InferenceParams, TextGenerator};
use crate::config::Settings;
use crate::types::RespondexError;

/// Native request body for the Titan text-embedding models.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanEmbeddingRequest<'a> {
    input_text: &'a str,
}

/// Native response body for the Titan text-embedding models.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanEmbeddingResponse {
    embedding: Vec<f32>,
    input_text_token_count: u32,
}

/// One configured Bedrock runtime client serving both provider traits.
///
/// Built once at startup and passed by reference into the routines; the
/// underlying SDK client is cheap to clone and already connection-pooled.
#[derive(Clone)]
pub struct BedrockProvider {
    client: Client,
    embedding_model_id: String,
    text_model_id: String,
}

impl BedrockProvider {
    /// Construct a client session against the Bedrock runtime.
    ///
    /// Static credentials from [`Settings`] take precedence; otherwise the
    /// SDK's default provider chain applies.
    pub async fn connect(settings: &Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.aws_region.clone()));
        if let (Some(key), Some(secret)) =
            (&settings.aws_access_key, &settings.aws_secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                key.clone(),
                secret.clone(),
                None,
                None,
                "respondex-settings",
            ));
        }
        let shared = loader.load().await;

        Self {
            client: Client::new(&shared),
            embedding_model_id: settings.embedding_model_id.clone(),
            text_model_id: settings.text_model_id.clone(),
        }
    }

    fn provider_error(message: String) -> RespondexError {
        RespondexError::Provider {
            provider: "bedrock",
            message,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for BedrockProvider {
    async fn embed(&self, input_text: &str) -> Result<EmbeddingOutput, RespondexError> {
        let body = serde_json::to_vec(&TitanEmbeddingRequest { input_text })?;

        let response = self
            .client
            .invoke_model()
            .model_id(&self.embedding_model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|err| Self::provider_error(DisplayErrorContext(&err).to_string()))?;

        let parsed: TitanEmbeddingResponse = serde_json::from_slice(response.body().as_ref())
            .map_err(|err| {
                Self::provider_error(format!("unable to parse Titan response body: {err}"))
            })?;

        debug!(
            model = %self.embedding_model_id,
            tokens = parsed.input_text_token_count,
            dims = parsed.embedding.len(),
            "embedding generated"
        );

        Ok(EmbeddingOutput {
            vector: parsed.embedding,
            token_count: parsed.input_text_token_count,
        })
    }
}

#[async_trait]
impl TextGenerator for BedrockProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &InferenceParams,
    ) -> Result<String, RespondexError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt.to_string()))
            .build()
            .map_err(|err| Self::provider_error(format!("invalid converse message: {err}")))?;

        let response = self
            .client
            .converse()
            .model_id(&self.text_model_id)
            .messages(message)
            .inference_config(
                InferenceConfiguration::builder()
                    .max_tokens(params.max_tokens)
                    .temperature(params.temperature)
                    .top_p(params.top_p)
                    .build(),
            )
            .send()
            .await
            .map_err(|err| Self::provider_error(DisplayErrorContext(&err).to_string()))?;

        let text = response
            .output()
            .and_then(|output| output.as_message().ok())
            .and_then(|message| message.content().first())
            .and_then(|block| block.as_text().ok())
            .cloned()
            .ok_or_else(|| {
                Self::provider_error("converse response contained no text content".to_string())
            })?;

        debug!(model = %self.text_model_id, chars = text.len(), "generation complete");

        Ok(text)
    }
}
