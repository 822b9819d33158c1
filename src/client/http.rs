//! HTTP client for the answer service.

use crate::answer::Turn;
use crate::error::{ProfChatError, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for the answer service's chat endpoint.
pub struct AnswerClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnswerClient {
    /// Create a client for the given service URL with an explicit timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send the conversation payload and return the answer text.
    #[instrument(skip(self, turns), fields(turns = turns.len()))]
    pub async fn send(&self, turns: &[Turn]) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&turns)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| "Failed to fetch response".to_string());
            return Err(ProfChatError::Generation(format!(
                "Answer service returned {}: {}",
                status, error
            )));
        }

        let body: ResponseBody = response.json().await?;
        debug!("Received answer ({} chars)", body.response.len());
        Ok(body.response)
    }

    /// Check the service's health endpoint.
    pub async fn health(&self) -> Result<()> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProfChatError::Generation(format!(
                "Answer service unhealthy: {}",
                response.status()
            )))
        }
    }
}

#[derive(Deserialize)]
struct ResponseBody {
    response: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = AnswerClient::new("http://localhost:3000/", Duration::from_secs(5));
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_response_body_parses() {
        let body: ResponseBody =
            serde_json::from_str(r#"{"response":"Try Dr. Lovelace."}"#).unwrap();
        assert_eq!(body.response, "Try Dr. Lovelace.");
    }
}
