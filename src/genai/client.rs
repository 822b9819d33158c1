//! Gemini API client over HTTP.

use super::{Content, GenerationConfig, Generator};
use crate::error::{ProfChatError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default base URL for the generative-language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default timeout for provider API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client for the Gemini embedding and chat-completion endpoints.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client reading `GOOGLE_API_KEY` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client from the environment with a custom request timeout.
    pub fn from_env_with_timeout(timeout: Duration) -> Result<Self> {
        let api_key = match std::env::var("GOOGLE_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => {
                return Err(ProfChatError::Config(
                    "GOOGLE_API_KEY not set. Set it with: export GOOGLE_API_KEY='...'".to_string(),
                ))
            }
        };
        Ok(Self::new(api_key, timeout))
    }

    /// Create a client with an explicit API key and timeout.
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, model: &str, action: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, model, action, self.api_key
        )
    }

    /// Call `embedContent` and return the raw embedding values.
    ///
    /// Values are returned untyped so the caller can validate the shape
    /// element-wise before using them.
    #[instrument(skip(self, text))]
    pub async fn embed_content(&self, model: &str, text: &str) -> Result<Vec<serde_json::Value>> {
        let body = json!({
            "model": format!("models/{}", model),
            "content": { "parts": [{ "text": text }] },
        });

        let response = self
            .http
            .post(self.endpoint(model, "embedContent"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProfChatError::Embedding(format!("Embedding API error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ProfChatError::Embedding(format!(
                "Embedding API returned {}: {}",
                status, detail
            )));
        }

        let parsed: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| ProfChatError::Embedding(format!("Invalid embedding response: {}", e)))?;

        debug!("Received {} embedding values", parsed.embedding.values.len());
        Ok(parsed.embedding.values)
    }

    /// Call `generateContent` and return the generated text.
    #[instrument(skip(self, contents), fields(turns = contents.len()))]
    pub async fn generate_content(
        &self,
        model: &str,
        contents: &[Content],
        max_output_tokens: u32,
    ) -> Result<String> {
        let config = GenerationConfig { max_output_tokens };
        let body = json!({
            "contents": contents,
            "generationConfig": config,
        });

        let response = self
            .http
            .post(self.endpoint(model, "generateContent"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProfChatError::Generation(format!("Chat API error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ProfChatError::Generation(format!(
                "Chat API returned {}: {}",
                status, detail
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProfChatError::Generation(format!("Invalid chat response: {}", e)))?;

        extract_text(&parsed)
    }
}

/// Generator backed by a Gemini client and a fixed model.
pub struct GeminiGenerator {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiGenerator {
    /// Create a generator for the given model.
    pub fn new(client: Arc<GeminiClient>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, contents: &[Content], max_output_tokens: u32) -> Result<String> {
        self.client
            .generate_content(&self.model, contents, max_output_tokens)
            .await
    }
}

// === Response Types ===

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Pull the answer text out of the first candidate.
fn extract_text(response: &GenerateContentResponse) -> Result<String> {
    let parts = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())
        .unwrap_or_default();

    let text: String = parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.is_empty() {
        return Err(ProfChatError::Generation(
            "Empty response from chat model".to_string(),
        ));
    }

    Ok(text)
}
