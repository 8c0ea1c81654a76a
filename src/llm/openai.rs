//! OpenAI-compatible REST chat client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::error::{LlmError, LlmResult};
use super::{LlmService, ResponseSchema};

/// Chat-completion client for the OpenAI REST API (or any compatible
/// endpoint).
#[derive(Debug, Clone)]
pub struct OpenAiLlm {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

impl OpenAiLlm {
    /// Creates a client for `base_url` (no trailing slash) using `model`.
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(
        &self,
        system: &str,
        user: &str,
        response_format: Option<Value>,
    ) -> LlmResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: truncate_for_log(&message),
            });
        }

        let body: ChatResponse = response.json().await?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::MalformedResponse {
                reason: "response contained no choices".to_string(),
            })?;

        if let Some(refusal) = choice.message.refusal {
            return Err(LlmError::Refusal { reason: refusal });
        }

        choice
            .message
            .content
            .ok_or_else(|| LlmError::MalformedResponse {
                reason: "choice had no content".to_string(),
            })
    }
}

#[async_trait::async_trait]
impl LlmService for OpenAiLlm {
    #[instrument(skip(self, system, user, schema), fields(model = %self.model, schema = schema.name))]
    async fn complete_structured(
        &self,
        system: &str,
        user: &str,
        schema: &ResponseSchema,
    ) -> LlmResult<Value> {
        let response_format = serde_json::json!({
            "type": "json_schema",
            "json_schema": {
                "name": schema.name,
                "strict": true,
                "schema": schema.schema,
            }
        });

        let content = self.chat(system, user, Some(response_format)).await?;

        debug!(content_len = content.len(), "Structured completion received");

        serde_json::from_str(&content).map_err(|e| LlmError::SchemaViolation {
            reason: format!("content is not valid JSON: {e}"),
        })
    }

    #[instrument(skip(self, system, user), fields(model = %self.model))]
    async fn complete_text(&self, system: &str, user: &str) -> LlmResult<String> {
        let content = self.chat(system, user, None).await?;
        Ok(content.trim().to_string())
    }
}

fn truncate_for_log(body: &str) -> String {
    const MAX: usize = 512;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}
