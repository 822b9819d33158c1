//! Profchat - Professor Matching Chat Assistant
//!
//! A retrieval-augmented chat service for finding professors from student reviews.
//!
//! # Overview
//!
//! Profchat allows you to:
//! - Run an HTTP answer service that embeds questions, retrieves the closest
//!   professor reviews from a managed vector index, and asks a chat model to
//!   answer with that context
//! - Hold an interactive terminal conversation against a running service
//! - Ask one-shot questions directly against the providers
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `genai` - Chat-model provider client and wire types
//! - `embedding` - Embedding generation
//! - `index` - Vector index abstraction
//! - `answer` - The answer pipeline (embed, retrieve, augment, generate)
//! - `client` - Conversation state machine and HTTP chat client
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use profchat::answer::{AnswerService, Role, Turn};
//! use profchat::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let service = AnswerService::from_settings(&settings)?;
//!
//!     let turns = vec![Turn::new(Role::User, "Who teaches algorithms well?")];
//!     let answer = service.answer(&turns).await?;
//!     println!("{}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod cli;
pub mod client;
pub mod config;
pub mod embedding;
pub mod error;
pub mod genai;
pub mod index;

pub use error::{ProfChatError, Result};
