//! Relevance filtering of published claim reviews.
//!
//! The claim-review API matches on keywords, so a query about one claim can
//! surface reviews of loosely related ones. Before a review's rating is
//! trusted as authoritative, the LLM judges whether it actually addresses
//! the sentence. Reviews are checked in API order and the first relevant one
//! wins.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, instrument};

use crate::llm::{LlmError, LlmService, ResponseSchema};
use crate::search::ClaimReview;

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that determines if claims are relevant to given sentences.";

fn relevance_schema() -> ResponseSchema {
    ResponseSchema {
        name: "claim_relevance",
        schema: json!({
            "type": "object",
            "properties": {
                "relevant": { "type": "boolean" }
            },
            "required": ["relevant"],
            "additionalProperties": false
        }),
    }
}

/// Judges whether published claim reviews address a given sentence.
pub struct RelevanceFilter<L: ?Sized> {
    llm: Arc<L>,
}

impl<L> RelevanceFilter<L>
where
    L: LlmService + ?Sized,
{
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }

    /// Returns the first review judged relevant to `sentence`, in the order
    /// the API ranked them.
    #[instrument(skip_all, fields(reviews = reviews.len()))]
    pub async fn first_relevant(
        &self,
        sentence: &str,
        reviews: &[ClaimReview],
    ) -> Result<Option<ClaimReview>, LlmError> {
        for review in reviews {
            if self.is_relevant(sentence, &review.claim_text).await? {
                debug!(claim = %review.claim_text, "relevant review found");
                return Ok(Some(review.clone()));
            }
        }

        debug!("no relevant review");
        Ok(None)
    }

    async fn is_relevant(&self, sentence: &str, claim_text: &str) -> Result<bool, LlmError> {
        let user = format!(
            "Determine if the following claim is relevant to the given sentence.\n\
             Sentence: \"{sentence}\"\n\
             Claim: \"{claim_text}\"\n\
             Is this claim directly relevant to the sentence?"
        );

        let value = self
            .llm
            .complete_structured(SYSTEM_PROMPT, &user, &relevance_schema())
            .await?;

        value
            .get("relevant")
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| LlmError::SchemaViolation {
                reason: "missing boolean field `relevant`".to_string(),
            })
    }
}
