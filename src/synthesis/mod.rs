//! Verdict synthesis from gathered evidence.
//!
//! The last resort of the verification chain: no published fact check
//! covered the sentence, so the LLM weighs the gathered evidence (and its
//! own knowledge when the bundle is empty) and produces a full verdict
//! under a strict JSON schema. Schema violations are hard errors, surfaced
//! to the orchestrator instead of being patched up.

pub mod error;


pub use error::{SynthesisError, SynthesisResult};

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::gather::{EvidenceBundle, EvidenceItem};
use crate::llm::{LlmService, ResponseSchema};
use crate::verdict::{Rating, Severity, Verdict};

/// Fetched evidence is truncated to this many characters in the prompt.
const EVIDENCE_SNIPPET_LEN: usize = 500;

/// Exactly this many key points are required of a synthesized verdict.
const REQUIRED_KEY_POINTS: usize = 3;

const SYSTEM_PROMPT: &str = "You are an expert fact-checker with broad knowledge across various \
                             fields including science, history, current events, politics, and \
                             culture.";

const REWRITE_SYSTEM_PROMPT: &str = "You are a helpful assistant that suggests rewrites for \
                                     statements to make them more accurate.";

fn verdict_schema() -> ResponseSchema {
    ResponseSchema {
        name: "statement_analysis",
        schema: json!({
            "type": "object",
            "properties": {
                "sentence": { "type": "string" },
                "explanation": { "type": "string" },
                "rating": {
                    "type": "string",
                    "enum": ["True", "Mostly True", "Half True", "Mostly False", "False"]
                },
                "severity": {
                    "type": "string",
                    "enum": ["high", "medium", "low"]
                },
                "key_points": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "sources": {
                    "type": "array",
                    "items": { "type": "string" }
                }
            },
            "required": ["sentence", "explanation", "rating", "severity", "key_points", "sources"],
            "additionalProperties": false
        }),
    }
}

/// Shape the LLM must return. Strict schemas cannot express an exact array
/// length, so the key-point count is validated after decoding.
#[derive(Debug, Deserialize)]
struct SynthesizedVerdict {
    #[allow(dead_code)]
    sentence: String,
    explanation: String,
    rating: String,
    severity: Severity,
    key_points: Vec<String>,
    sources: Vec<String>,
}

/// Produces verdicts for claims no published review covers.
pub struct VerdictSynthesizer<L: ?Sized> {
    llm: Arc<L>,
}

impl<L> VerdictSynthesizer<L>
where
    L: LlmService + ?Sized,
{
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }

    /// Synthesizes a verdict for `sentence` from the gathered evidence.
    #[instrument(skip_all, fields(sources = bundle.source_urls.len()))]
    pub async fn synthesize(
        &self,
        sentence: &str,
        bundle: &EvidenceBundle,
    ) -> SynthesisResult<Verdict> {
        let user = build_prompt(sentence, bundle);
        let value = self
            .llm
            .complete_structured(SYSTEM_PROMPT, &user, &verdict_schema())
            .await?;

        let synthesized: SynthesizedVerdict =
            serde_json::from_value(value).map_err(|e| SynthesisError::Schema {
                reason: e.to_string(),
            })?;

        if synthesized.key_points.len() != REQUIRED_KEY_POINTS {
            return Err(SynthesisError::Schema {
                reason: format!(
                    "expected {REQUIRED_KEY_POINTS} key points, got {}",
                    synthesized.key_points.len()
                ),
            });
        }

        let rating = Rating::from_text(&synthesized.rating);
        debug!(%rating, severity = %synthesized.severity, "verdict synthesized");

        // The model echoes the sentence back; the verdict keeps the verbatim
        // input so cache keys stay stable.
        let sources = if synthesized.sources.is_empty() {
            bundle.source_urls.clone()
        } else {
            synthesized.sources
        };

        Ok(Verdict {
            sentence: sentence.to_string(),
            explanation: synthesized.explanation,
            rating,
            rating_text: synthesized.rating,
            severity: synthesized.severity,
            key_points: synthesized.key_points,
            sources,
            checked_at: chrono::Utc::now().date_naive(),
        })
    }

    /// Suggests a more accurate rewrite of a rated sentence.
    pub async fn suggest_rewrite(
        &self,
        sentence: &str,
        rating_text: &str,
    ) -> SynthesisResult<String> {
        let user = format!(
            "Given the following sentence and its fact-check rating, suggest a rewrite that is \
             more accurate:\n\
             Sentence: \"{sentence}\"\n\
             Fact-check rating: {rating_text}\n\
             Provide a rewritten version of the sentence that is more accurate based on the \
             fact-check rating."
        );

        let rewrite = self.llm.complete_text(REWRITE_SYSTEM_PROMPT, &user).await?;
        Ok(rewrite.trim().to_string())
    }
}

fn build_prompt(sentence: &str, bundle: &EvidenceBundle) -> String {
    format!(
        "Analyze the following statement thoroughly:\n\
         \"{sentence}\"\n\n\
         Consider the following information from search results and news articles:\n\n\
         Search Results:\n\
         {search}\n\n\
         Recent News:\n\
         {news}\n\n\
         URLs Used for Fact-Check:\n\
         {urls}\n\n\
         Based on this information and your knowledge, please provide:\n\
         1. A detailed explanation of the fact-check (200-300 words)\n\
         2. The original sentence\n\
         3. A rating on the following scale: True, Mostly True, Half True, Mostly False, False\n\
         4. A severity assessment (high, medium, low) based on the potential impact of this \
         claim if believed\n\
         5. Three key points that summarize your fact-check",
        search = format_channel(&bundle.search),
        news = format_channel(&bundle.news),
        urls = bundle.source_urls.join("\n"),
    )
}

fn format_channel(items: &[EvidenceItem]) -> String {
    let formatted: Vec<String> = items
        .iter()
        .map(|item| {
            if item.fetched {
                format!(
                    "Title: {}\nContent: {}...",
                    item.title,
                    truncate_chars(&item.text, EVIDENCE_SNIPPET_LEN)
                )
            } else {
                format!("Title: {}\nSnippet: {}", item.title, item.text)
            }
        })
        .collect();

    formatted.join("\n\n")
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
