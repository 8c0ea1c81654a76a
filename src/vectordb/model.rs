use qdrant_client::qdrant::ScoredPoint;
use qdrant_client::qdrant::point_id::PointIdOptions;

/// A claim embedding plus its JSON payload, ready for upsert.
#[derive(Debug, Clone)]
pub struct ClaimPoint {
    /// Stable point id (BLAKE3 of the sentence, truncated to 64 bits).
    pub id: u64,
    /// Embedding vector.
    pub vector: Vec<f32>,
    /// Cached-claim payload carried alongside the vector.
    pub payload: serde_json::Value,
}

impl ClaimPoint {
    pub fn new(id: u64, vector: Vec<f32>, payload: serde_json::Value) -> Self {
        Self {
            id,
            vector,
            payload,
        }
    }
}

/// The closest stored point to a query vector.
#[derive(Debug, Clone)]
pub struct NearestNeighbor {
    /// Point id.
    pub id: u64,
    /// Cosine distance to the query (`1 - cosine similarity`, in `[0, 2]`).
    pub distance: f32,
    /// Stored payload.
    pub payload: serde_json::Value,
}

impl NearestNeighbor {
    /// Builds a neighbor from a Qdrant scored point.
    ///
    /// Qdrant returns cosine *similarity* as the score for cosine
    /// collections; it is converted to a distance here so callers see one
    /// metric regardless of backend.
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => n,
            _ => return None,
        };

        let payload: serde_json::Map<String, serde_json::Value> = point
            .payload
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::from(v)))
            .collect();

        Some(NearestNeighbor {
            id,
            distance: 1.0 - point.score,
            payload: serde_json::Value::Object(payload),
        })
    }
}

/// Cosine similarity between two vectors (0.0 when shapes differ).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
