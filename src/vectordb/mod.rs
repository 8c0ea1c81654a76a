//! Qdrant vector database integration.
//!
//! The semantic cache talks to the index through [`VectorDbClient`]; the
//! production implementation is [`QdrantClient`], tests use the in-memory
//! [`MockVectorDbClient`]. Distances follow one convention everywhere:
//! cosine distance (`1 - cosine similarity`).

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{QdrantClient, VectorDbClient};
pub use error::VectorDbError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockVectorDbClient;
pub use model::{ClaimPoint, NearestNeighbor, cosine_similarity};

pub const DEFAULT_COLLECTION_NAME: &str = "claims_checked";
