use std::collections::HashMap;

use crate::vectordb::model::cosine_similarity;
use crate::vectordb::{ClaimPoint, NearestNeighbor, VectorDbClient, VectorDbError};

/// In-memory vector index for tests.
///
/// Brute-force cosine search over stored points, same distance convention as
/// the Qdrant client (`distance = 1 - cosine similarity`).
#[derive(Default)]
pub struct MockVectorDbClient {
    collections: std::sync::RwLock<HashMap<String, MockCollection>>,
}

#[derive(Default, Clone)]
struct MockCollection {
    vector_size: u64,
    points: HashMap<u64, MockStoredPoint>,
}

#[derive(Clone)]
struct MockStoredPoint {
    vector: Vec<f32>,
    payload: serde_json::Value,
}

impl MockVectorDbClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points stored in `collection`, if it exists.
    pub fn point_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .map(|c| c.points.len())
    }
}

impl VectorDbClient for MockVectorDbClient {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDbError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::CreateCollectionFailed {
                    collection: name.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        collections
            .entry(name.to_string())
            .or_insert(MockCollection {
                vector_size,
                points: HashMap::new(),
            });

        Ok(())
    }

    async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<ClaimPoint>,
    ) -> Result<(), VectorDbError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::UpsertFailed {
                    collection: collection.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll =
            collections
                .get_mut(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        for point in points {
            if point.vector.len() as u64 != coll.vector_size {
                return Err(VectorDbError::InvalidDimension {
                    expected: coll.vector_size as usize,
                    actual: point.vector.len(),
                });
            }

            coll.points.insert(
                point.id,
                MockStoredPoint {
                    vector: point.vector,
                    payload: point.payload,
                },
            );
        }

        Ok(())
    }

    async fn nearest(
        &self,
        collection: &str,
        query: Vec<f32>,
    ) -> Result<Option<NearestNeighbor>, VectorDbError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll =
            collections
                .get(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        let best = coll
            .points
            .iter()
            .map(|(&id, p)| NearestNeighbor {
                id,
                distance: 1.0 - cosine_similarity(&query, &p.vector),
                payload: p.payload.clone(),
            })
            .min_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        Ok(best)
    }
}
