//! Verdict domain types.
//!
//! A [`Verdict`] is the structured judgment attached to one claim: a
//! categorical [`Rating`], a [`Severity`] band, a prose explanation, key
//! points, and the sources consulted. [`Severity::from_rating_text`] is the
//! fixed mapping used when a rating comes from an authoritative claim-review
//! source; LLM-synthesized severities are advisory and bypass the table.


use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Categorical truthfulness rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    True,
    #[serde(rename = "Mostly True")]
    MostlyTrue,
    #[serde(rename = "Half True")]
    HalfTrue,
    #[serde(rename = "Mostly False")]
    MostlyFalse,
    False,
    Unknown,
}

impl Rating {
    /// Parses a free-text rating, case-insensitively.
    ///
    /// Authoritative claim-review APIs return arbitrary rating strings
    /// ("Pants on Fire!", "Satire", ...); anything outside the five-point
    /// scale maps to [`Rating::Unknown`]. The verbatim text is preserved
    /// separately in [`Verdict::rating_text`].
    pub fn from_text(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "true" => Rating::True,
            "mostly true" => Rating::MostlyTrue,
            "half true" => Rating::HalfTrue,
            "mostly false" => Rating::MostlyFalse,
            "false" => Rating::False,
            _ => Rating::Unknown,
        }
    }

    /// Canonical display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::True => "True",
            Rating::MostlyTrue => "Mostly True",
            Rating::HalfTrue => "Half True",
            Rating::MostlyFalse => "Mostly False",
            Rating::False => "False",
            Rating::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Impact band of a claim if believed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// Maps an authoritative rating string to a severity band.
    ///
    /// The table is fixed: false-leaning ratings are high severity,
    /// mixed ratings medium, true-leaning low, anything else unknown.
    pub fn from_rating_text(rating: &str) -> Self {
        match rating.trim().to_lowercase().as_str() {
            "false" | "pants on fire!" | "pants on fire" | "mostly false" => Severity::High,
            "half true" | "mixture" => Severity::Medium,
            "mostly true" | "true" => Severity::Low,
            _ => Severity::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured judgment for one verified claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Verbatim sentence the verdict is about.
    pub sentence: String,
    /// Fact-check explanation (200-300 words when synthesized).
    pub explanation: String,
    /// Categorical rating.
    pub rating: Rating,
    /// Verbatim rating text as returned by the source.
    pub rating_text: String,
    /// Impact band.
    pub severity: Severity,
    /// Short summary points (three when synthesized).
    pub key_points: Vec<String>,
    /// URLs / citations used as evidence.
    pub sources: Vec<String>,
    /// Date the verdict was produced.
    pub checked_at: NaiveDate,
}

impl Verdict {
    /// Placeholder verdict used when verification of a claim fails.
    ///
    /// Every segmented sentence receives a verdict; internal errors degrade
    /// to `Unknown`/`unknown` rather than dropping the claim.
    pub fn degraded(sentence: &str, reason: &str) -> Self {
        Self {
            sentence: sentence.to_string(),
            explanation: format!("Verification could not be completed: {reason}"),
            rating: Rating::Unknown,
            rating_text: "Unknown".to_string(),
            severity: Severity::Unknown,
            key_points: Vec::new(),
            sources: Vec::new(),
            checked_at: chrono::Utc::now().date_naive(),
        }
    }
}

/// One segmented sentence with its verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// 1-based position in document order.
    pub position: usize,
    /// Verbatim sentence text.
    pub sentence: String,
    /// Attached verdict.
    pub verdict: Verdict,
    /// Whether the verdict was served from the semantic cache.
    pub cache_hit: bool,
}
