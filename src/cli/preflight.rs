//! Pre-flight checks before talking to the providers.
//!
//! Validates that required credentials and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{ProfChatError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Serving or asking requires both provider credentials and an index host.
    Answer,
    /// Chatting only needs a reachable answer service.
    Chat,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Answer => {
            check_env_key("GOOGLE_API_KEY")?;
            check_env_key("PINECONE_API_KEY")?;
            if settings.index.host.is_empty() {
                return Err(ProfChatError::Config(
                    "index.host is not configured. Set it in the config file (profchat config edit)."
                        .to_string(),
                ));
            }
        }
        Operation::Chat => {
            // The chat client carries no credentials; the service does.
        }
    }
    Ok(())
}

/// Check that an environment variable is set and non-empty.
fn check_env_key(name: &str) -> Result<()> {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(ProfChatError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            name, name
        ))),
        Err(_) => Err(ProfChatError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}
