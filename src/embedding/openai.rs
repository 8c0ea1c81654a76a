//! OpenAI embeddings REST client.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{Embedder, error::EmbeddingError};

/// Embedding client for the OpenAI REST API.
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    dim: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    /// Creates an embedder for `model`, expecting `dim`-sized vectors.
    pub fn new(base_url: &str, api_key: &str, model: &str, dim: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            dim,
        }
    }
}

#[async_trait::async_trait]
impl Embedder for OpenAiEmbedder {
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: EmbeddingResponse = response.json().await?;
        let vector = body
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::MalformedResponse {
                reason: "response contained no embedding data".to_string(),
            })?;

        if vector.len() != self.dim {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }

        debug!(dim = vector.len(), "Embedding generated");
        Ok(vector)
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
