//! Gemini embeddings implementation.

use super::Embedder;
use crate::error::{ProfChatError, Result};
use crate::genai::GeminiClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Gemini-based embedder.
pub struct GeminiEmbedder {
    client: Arc<GeminiClient>,
    model: String,
    dimensions: usize,
}

impl GeminiEmbedder {
    /// Create a new Gemini embedder with default settings.
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self::with_config(client, "embedding-001", 768)
    }

    /// Create a new Gemini embedder with custom model and dimensions.
    pub fn with_config(client: Arc<GeminiClient>, model: &str, dimensions: usize) -> Self {
        Self {
            client,
            model: model.to_string(),
            dimensions,
        }
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let values = self.client.embed_content(&self.model, text).await?;
        let embedding = validate_embedding(&values)?;
        debug!("Generated embedding with {} dimensions", embedding.len());
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Validate that every returned value is a number before the vector is used.
///
/// The provider response is deserialized untyped; anything other than an
/// all-numeric array is rejected here, before any index query happens.
fn validate_embedding(values: &[serde_json::Value]) -> Result<Vec<f32>> {
    if values.is_empty() {
        return Err(ProfChatError::Embedding(
            "Empty embedding response".to_string(),
        ));
    }

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64().map(|f| f as f32).ok_or_else(|| {
                ProfChatError::Embedding(format!("Invalid embedding format: element {} is not a number", i))
            })
        })
        .collect()
}
