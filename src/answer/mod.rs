//! Answer pipeline: embed the question, retrieve reviews, generate a response.

pub mod context;
mod service;

pub use context::format_matches_for_prompt;
pub use service::AnswerService;

use serde::{Deserialize, Serialize};

/// Role of a conversation turn, as used on the wire between client and service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    /// Any other role value; passed through to the provider verbatim.
    Other(String),
}

impl Role {
    /// Map to the chat provider's role vocabulary.
    ///
    /// The mapping is total: `user` stays `user`, `assistant` becomes the
    /// provider's `model`, and unrecognized roles pass through unchanged.
    pub fn provider_role(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "model",
            Role::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(role),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::User => "user".to_string(),
            Role::Assistant => "assistant".to_string(),
            Role::Other(role) => role,
        }
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Create a new turn.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mapping_is_total() {
        assert_eq!(Role::User.provider_role(), "user");
        assert_eq!(Role::Assistant.provider_role(), "model");
        assert_eq!(Role::Other("tool".to_string()).provider_role(), "tool");
    }

    #[test]
    fn test_role_round_trip_on_the_wire() {
        let turn: Turn = serde_json::from_str(r#"{"role":"assistant","content":"Hi!"}"#).unwrap();
        assert_eq!(turn.role, Role::Assistant);

        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn test_unknown_role_survives_deserialization() {
        let turn: Turn = serde_json::from_str(r#"{"role":"system","content":"x"}"#).unwrap();
        assert_eq!(turn.role, Role::Other("system".to_string()));
        assert_eq!(turn.role.provider_role(), "system");
    }
}
