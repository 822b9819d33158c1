//! In-memory vector index implementation.
//!
//! Useful for testing and local development without a managed index.

use super::{cosine_similarity, ReviewMatch, VectorIndex};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::RwLock;

/// A stored review with its embedding.
struct StoredReview {
    review: ReviewMatch,
    embedding: Vec<f32>,
}

/// In-memory vector index.
pub struct MemoryIndex {
    reviews: RwLock<Vec<StoredReview>>,
}

impl MemoryIndex {
    /// Create a new in-memory index.
    pub fn new() -> Self {
        Self {
            reviews: RwLock::new(Vec::new()),
        }
    }

    /// Store a review with its embedding.
    pub fn upsert(&self, review: ReviewMatch, embedding: Vec<f32>) {
        let mut reviews = self.reviews.write().unwrap();
        if let Some(existing) = reviews.iter_mut().find(|s| s.review.id == review.id) {
            existing.review = review;
            existing.embedding = embedding;
        } else {
            reviews.push(StoredReview { review, embedding });
        }
    }
}

impl Default for MemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ReviewMatch>> {
        let reviews = self.reviews.read().unwrap();

        let mut scored: Vec<(f32, ReviewMatch)> = reviews
            .iter()
            .map(|s| (cosine_similarity(embedding, &s.embedding), s.review.clone()))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored.into_iter().map(|(_, review)| review).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: &str, subject: &str) -> ReviewMatch {
        ReviewMatch {
            id: id.to_string(),
            review: format!("Review of {}", id),
            subject: subject.to_string(),
            stars: 4.0,
        }
    }

    #[tokio::test]
    async fn test_memory_index_orders_by_similarity() {
        let index = MemoryIndex::new();
        index.upsert(review("Dr. Near", "CS"), vec![1.0, 0.0, 0.0]);
        index.upsert(review("Dr. Far", "Math"), vec![0.0, 1.0, 0.0]);

        let matches = index.query(&[0.9, 0.1, 0.0], 10).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "Dr. Near");
        assert_eq!(matches[1].id, "Dr. Far");
    }

    #[tokio::test]
    async fn test_memory_index_truncates_to_top_k() {
        let index = MemoryIndex::new();
        for i in 0..10 {
            index.upsert(review(&format!("Prof {}", i), "CS"), vec![1.0, i as f32]);
        }

        let matches = index.query(&[1.0, 0.0], 5).await.unwrap();
        assert_eq!(matches.len(), 5);
    }

    #[tokio::test]
    async fn test_memory_index_upsert_replaces() {
        let index = MemoryIndex::new();
        index.upsert(review("Dr. Same", "CS"), vec![1.0, 0.0]);
        index.upsert(review("Dr. Same", "Physics"), vec![1.0, 0.0]);

        let matches = index.query(&[1.0, 0.0], 10).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].subject, "Physics");
    }
}
