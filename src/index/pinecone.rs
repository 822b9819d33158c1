//! Pinecone index client.
//!
//! Queries a serverless Pinecone index over HTTPS. Stored vectors carry
//! `review`, `subject`, and `stars` metadata for each professor.

use super::{ReviewMatch, VectorIndex};
use crate::error::{ProfChatError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

/// Pinecone-backed vector index.
pub struct PineconeIndex {
    http: reqwest::Client,
    host: String,
    api_key: String,
    namespace: String,
}

impl PineconeIndex {
    /// Create an index client reading `PINECONE_API_KEY` from the environment.
    pub fn from_env(host: &str, namespace: &str, timeout: Duration) -> Result<Self> {
        let api_key = match std::env::var("PINECONE_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => {
                return Err(ProfChatError::Config(
                    "PINECONE_API_KEY not set. Set it with: export PINECONE_API_KEY='...'"
                        .to_string(),
                ))
            }
        };
        Ok(Self::new(host, &api_key, namespace, timeout))
    }

    /// Create an index client with explicit credentials.
    pub fn new(host: &str, api_key: &str, namespace: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        // Accept both bare hosts and full URLs from config.
        let host = host.trim_end_matches('/').to_string();
        let host = if host.starts_with("http") {
            host
        } else {
            format!("https://{}", host)
        };

        Self {
            http,
            host,
            api_key: api_key.to_string(),
            namespace: namespace.to_string(),
        }
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    #[instrument(skip(self, embedding), fields(dimensions = embedding.len()))]
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ReviewMatch>> {
        let body = json!({
            "vector": embedding,
            "topK": top_k,
            "includeMetadata": true,
            "namespace": self.namespace,
        });

        let response = self
            .http
            .post(format!("{}/query", self.host))
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProfChatError::VectorIndex(format!("Index query failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ProfChatError::VectorIndex(format!(
                "Index returned {}: {}",
                status, detail
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| ProfChatError::VectorIndex(format!("Invalid index response: {}", e)))?;

        debug!("Index returned {} matches", parsed.matches.len());

        // Preserve the index's ordering; no re-ranking.
        Ok(parsed
            .matches
            .into_iter()
            .map(|m| ReviewMatch {
                id: m.id,
                review: m.metadata.review,
                subject: m.metadata.subject,
                stars: m.metadata.stars,
            })
            .collect())
    }
}

// === Response Types ===

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Deserialize)]
struct Match {
    id: String,
    #[serde(default)]
    metadata: MatchMetadata,
}

#[derive(Deserialize, Default)]
struct MatchMetadata {
    #[serde(default)]
    review: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    stars: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_response() {
        let raw = r#"{
            "matches": [
                {
                    "id": "Dr. Ada Lovelace",
                    "score": 0.91,
                    "metadata": { "review": "Brilliant lectures.", "subject": "Computer Science", "stars": 5 }
                },
                {
                    "id": "Dr. Alan Turing",
                    "score": 0.87,
                    "metadata": { "review": "Tough but fair.", "subject": "Mathematics", "stars": 4 }
                }
            ],
            "namespace": "ns1"
        }"#;

        let parsed: QueryResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.matches.len(), 2);
        assert_eq!(parsed.matches[0].id, "Dr. Ada Lovelace");
        assert_eq!(parsed.matches[0].metadata.stars, 5.0);
        assert_eq!(parsed.matches[1].metadata.subject, "Mathematics");
    }

    #[test]
    fn test_parse_empty_response() {
        let parsed: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.matches.is_empty());
    }

    #[test]
    fn test_host_normalization() {
        let index = PineconeIndex::new(
            "rag-test.svc.pinecone.io",
            "key",
            "ns1",
            Duration::from_secs(5),
        );
        assert_eq!(index.host, "https://rag-test.svc.pinecone.io");

        let index = PineconeIndex::new(
            "https://rag-test.svc.pinecone.io/",
            "key",
            "ns1",
            Duration::from_secs(5),
        );
        assert_eq!(index.host, "https://rag-test.svc.pinecone.io");
    }
}
