use qdrant_client::Payload;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};

use super::error::VectorDbError;
use super::model::{ClaimPoint, NearestNeighbor};

#[derive(Clone)]
/// Direct Qdrant client wrapper.
pub struct QdrantClient {
    client: Qdrant,
    url: String,
}

impl QdrantClient {
    /// Creates a client for `url`.
    pub async fn new(url: &str) -> Result<Self, VectorDbError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| VectorDbError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), VectorDbError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Creates a collection with cosine distance.
    pub async fn create_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> Result<(), VectorDbError> {
        let vectors_config = VectorParamsBuilder::new(vector_size, Distance::Cosine);

        self.client
            .create_collection(
                CreateCollectionBuilder::new(name)
                    .vectors_config(vectors_config)
                    .on_disk_payload(true),
            )
            .await
            .map_err(|e| VectorDbError::CreateCollectionFailed {
                collection: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Ensures a collection exists (creates it if missing).
    pub async fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> Result<(), VectorDbError> {
        let exists = self.client.collection_exists(name).await.map_err(|e| {
            VectorDbError::CreateCollectionFailed {
                collection: name.to_string(),
                message: e.to_string(),
            }
        })?;

        if !exists {
            self.create_collection(name, vector_size).await?;
        }

        Ok(())
    }

    /// Upserts claim points into a collection.
    pub async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<ClaimPoint>,
    ) -> Result<(), VectorDbError> {
        if points.is_empty() {
            return Ok(());
        }

        let mut qdrant_points = Vec::with_capacity(points.len());
        for p in points {
            let payload =
                Payload::try_from(p.payload).map_err(|e| VectorDbError::InvalidPayload {
                    id: p.id,
                    message: e.to_string(),
                })?;
            qdrant_points.push(PointStruct::new(p.id, p.vector, payload));
        }

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, qdrant_points).wait(true))
            .await
            .map_err(|e| VectorDbError::UpsertFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Returns the nearest stored point to `query`, if the collection holds
    /// any points.
    pub async fn nearest(
        &self,
        collection: &str,
        query: Vec<f32>,
    ) -> Result<Option<NearestNeighbor>, VectorDbError> {
        let search_builder = SearchPointsBuilder::new(collection, query, 1).with_payload(true);

        let search_result = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(search_result
            .result
            .into_iter()
            .next()
            .and_then(NearestNeighbor::from_scored_point))
    }
}

/// Minimal async interface used by the semantic cache.
pub trait VectorDbClient: Send + Sync {
    /// Ensures a collection exists.
    fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> impl std::future::Future<Output = Result<(), VectorDbError>> + Send;

    /// Upserts claim points.
    fn upsert_points(
        &self,
        collection: &str,
        points: Vec<ClaimPoint>,
    ) -> impl std::future::Future<Output = Result<(), VectorDbError>> + Send;

    /// Finds the nearest stored point to `query`.
    fn nearest(
        &self,
        collection: &str,
        query: Vec<f32>,
    ) -> impl std::future::Future<Output = Result<Option<NearestNeighbor>, VectorDbError>> + Send;
}

impl VectorDbClient for QdrantClient {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDbError> {
        self.ensure_collection(name, vector_size).await
    }

    async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<ClaimPoint>,
    ) -> Result<(), VectorDbError> {
        self.upsert_points(collection, points).await
    }

    async fn nearest(
        &self,
        collection: &str,
        query: Vec<f32>,
    ) -> Result<Option<NearestNeighbor>, VectorDbError> {
        self.nearest(collection, query).await
    }
}
