//! Chat-model provider client and wire types.
//!
//! The provider speaks the Gemini generative-language API: ordered `contents`
//! of role-tagged text parts, with a generation config capping output tokens.

mod client;

pub use client::{GeminiClient, GeminiGenerator};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One entry in a chat request: a role plus text parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a content entry with a single text part.
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Create a user-role content entry.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new("user", text)
    }

    /// Concatenated text of all parts.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// A single text part of a content entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub text: String,
}

/// Generation parameters sent alongside the chat contents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
}

/// Trait for chat response generation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a response for the given ordered contents.
    async fn generate(&self, contents: &[Content], max_output_tokens: u32) -> Result<String>;
}
