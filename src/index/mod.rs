//! Vector index abstraction for Profchat.
//!
//! Provides a trait-based interface over the managed review index. The index
//! is populated by an external ingestion pipeline; only queries happen here.

mod memory;
mod pinecone;

pub use memory::MemoryIndex;
pub use pinecone::PineconeIndex;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One professor review retrieved from the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewMatch {
    /// Professor name, used as the stored vector's identifier.
    pub id: String,
    /// The review text.
    pub review: String,
    /// Subject the professor teaches.
    pub subject: String,
    /// Star rating given by the reviewer.
    pub stars: f32,
}

/// Trait for vector index implementations.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return the nearest neighbors to the query embedding, closest first.
    ///
    /// No minimum-similarity threshold is applied; neighbors are accepted
    /// regardless of distance.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ReviewMatch>>;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
