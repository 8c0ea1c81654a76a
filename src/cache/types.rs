use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::CacheError;
use crate::verdict::{Rating, Severity, Verdict};

/// A persisted claim + verdict, as stored in the vector index payload.
///
/// Uniqueness is semantic, not exact-string: two entries with different
/// sentence text are duplicates once their embeddings are close enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedClaim {
    pub sentence: String,
    pub explanation: String,
    pub rating: Rating,
    pub rating_text: String,
    pub severity: Severity,
    pub key_points: Vec<String>,
    pub sources: Vec<String>,
    pub checked_at: NaiveDate,
}

impl CachedClaim {
    /// Serializes into a vector-point payload.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("cached claim serialization cannot fail")
    }

    /// Decodes a vector-point payload.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, CacheError> {
        serde_json::from_value(payload).map_err(|e| CacheError::PayloadDecode {
            reason: e.to_string(),
        })
    }

    /// The verdict this entry preserves.
    pub fn to_verdict(&self) -> Verdict {
        Verdict {
            sentence: self.sentence.clone(),
            explanation: self.explanation.clone(),
            rating: self.rating,
            rating_text: self.rating_text.clone(),
            severity: self.severity,
            key_points: self.key_points.clone(),
            sources: self.sources.clone(),
            checked_at: self.checked_at,
        }
    }
}

impl From<&Verdict> for CachedClaim {
    fn from(verdict: &Verdict) -> Self {
        Self {
            sentence: verdict.sentence.clone(),
            explanation: verdict.explanation.clone(),
            rating: verdict.rating,
            rating_text: verdict.rating_text.clone(),
            severity: verdict.severity,
            key_points: verdict.key_points.clone(),
            sources: verdict.sources.clone(),
            checked_at: verdict.checked_at,
        }
    }
}

/// Result of a cache lookup.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    /// The nearest stored claim and its similarity to the query
    /// (`1 / (1 + distance)`, so `1.0` for an exact match).
    Found {
        claim: CachedClaim,
        similarity: f32,
    },
    /// The index holds no points at all.
    Miss,
}

impl CacheLookup {
    /// Returns the found claim when `similarity >= threshold`.
    ///
    /// Equality counts as a hit: at exactly the threshold two claims are the
    /// same claim.
    pub fn hit(&self, threshold: f32) -> Option<(&CachedClaim, f32)> {
        match self {
            CacheLookup::Found { claim, similarity } if *similarity >= threshold => {
                Some((claim, *similarity))
            }
            _ => None,
        }
    }
}
