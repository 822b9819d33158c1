//! Configuration module for Profchat.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnswerPrompts, Prompts};
pub use settings::{
    ClientSettings, EmbeddingSettings, GenerationSettings, GeneralSettings, IndexSettings,
    PromptSettings, Settings,
};
