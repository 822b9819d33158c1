//! Conversation client: per-turn state machine and HTTP chat client.

mod http;

pub use http::AnswerClient;

use crate::answer::{Role, Turn};

/// Fixed apology shown when a send fails.
pub const APOLOGY_MESSAGE: &str = "Sorry, there was an error processing your request.";

/// Default assistant greeting opening every session.
pub const GREETING_MESSAGE: &str =
    "Hi! I'm the Rate My Professor support assistant. How can I help you today?";

/// Resolution status of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    /// Placeholder awaiting the service's answer.
    Pending,
    /// Answer received and written in place.
    Settled,
    /// Send failed; content holds the apology message.
    Failed,
}

/// One rendered turn of the conversation, with its resolution status.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub status: TurnStatus,
}

impl ChatTurn {
    fn settled(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            status: TurnStatus::Settled,
        }
    }

    fn placeholder() -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            status: TurnStatus::Pending,
        }
    }
}

/// In-memory conversation state machine.
///
/// Holds the ordered turn list for the life of the session. Submitting
/// appends the user turn plus a pending assistant placeholder; the
/// placeholder is later resolved in place exactly once, either settled with
/// the answer or failed with the apology message. While a request is in
/// flight, further submissions are ignored.
pub struct Conversation {
    turns: Vec<ChatTurn>,
    in_flight: bool,
}

impl Conversation {
    /// Start a conversation opened by the assistant greeting.
    pub fn new() -> Self {
        Self {
            turns: vec![ChatTurn::settled(Role::Assistant, GREETING_MESSAGE)],
            in_flight: false,
        }
    }

    /// Submit user input.
    ///
    /// Returns the outbound payload — the full history up to and including
    /// the new user turn, placeholder excluded — or `None` when the input is
    /// blank or a request is already in flight. In either rejected case
    /// nothing is appended.
    pub fn submit(&mut self, input: &str) -> Option<Vec<Turn>> {
        let text = input.trim();
        if text.is_empty() || self.in_flight {
            return None;
        }

        self.turns.push(ChatTurn::settled(Role::User, text));

        let payload: Vec<Turn> = self
            .turns
            .iter()
            .map(|t| Turn::new(t.role.clone(), t.content.clone()))
            .collect();

        self.turns.push(ChatTurn::placeholder());
        self.in_flight = true;

        Some(payload)
    }

    /// Resolve the pending placeholder with the service's answer.
    pub fn settle(&mut self, answer: impl Into<String>) {
        if let Some(turn) = self.pending_mut() {
            turn.content = answer.into();
            turn.status = TurnStatus::Settled;
        }
        self.in_flight = false;
    }

    /// Resolve the pending placeholder as failed, with the apology message.
    pub fn fail(&mut self) {
        if let Some(turn) = self.pending_mut() {
            turn.content = APOLOGY_MESSAGE.to_string();
            turn.status = TurnStatus::Failed;
        }
        self.in_flight = false;
    }

    /// Whether a request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    fn pending_mut(&mut self) -> Option<&mut ChatTurn> {
        self.turns
            .iter_mut()
            .rev()
            .find(|t| t.status == TurnStatus::Pending)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_appends_nothing() {
        let mut conv = Conversation::new();
        assert!(conv.submit("").is_none());
        assert!(conv.submit("   \t\n").is_none());
        assert_eq!(conv.turns().len(), 1);
        assert!(!conv.is_busy());
    }

    #[test]
    fn test_submit_while_busy_is_ignored() {
        let mut conv = Conversation::new();
        assert!(conv.submit("first question").is_some());
        assert!(conv.is_busy());

        assert!(conv.submit("second question").is_none());
        // Still just greeting + user + placeholder.
        assert_eq!(conv.turns().len(), 3);
    }

    #[test]
    fn test_payload_excludes_placeholder() {
        let mut conv = Conversation::new();
        let payload = conv.submit("Who teaches algorithms well?").unwrap();

        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].role, Role::Assistant);
        assert_eq!(payload[1].role, Role::User);
        assert_eq!(payload[1].content, "Who teaches algorithms well?");

        // The placeholder exists locally but was not sent.
        assert_eq!(conv.turns().len(), 3);
        assert_eq!(conv.turns()[2].status, TurnStatus::Pending);
        assert!(conv.turns()[2].content.is_empty());
    }

    #[test]
    fn test_settle_overwrites_placeholder_in_place() {
        let mut conv = Conversation::new();
        conv.submit("Who teaches algorithms well?").unwrap();
        conv.settle("Dr. Lovelace comes highly recommended.");

        // Length stays 3; the answer landed at the placeholder's index.
        assert_eq!(conv.turns().len(), 3);
        assert_eq!(conv.turns()[2].status, TurnStatus::Settled);
        assert_eq!(
            conv.turns()[2].content,
            "Dr. Lovelace comes highly recommended."
        );
        assert!(!conv.is_busy());
    }

    #[test]
    fn test_fail_resolves_placeholder_with_apology() {
        let mut conv = Conversation::new();
        conv.submit("Who teaches algorithms well?").unwrap();
        conv.fail();

        // No dangling empty bubble: the placeholder itself carries the apology.
        assert_eq!(conv.turns().len(), 3);
        assert_eq!(conv.turns()[2].status, TurnStatus::Failed);
        assert_eq!(conv.turns()[2].content, APOLOGY_MESSAGE);
        assert!(!conv.is_busy());
    }

    #[test]
    fn test_next_submission_allowed_after_resolution() {
        let mut conv = Conversation::new();
        conv.submit("first").unwrap();
        conv.settle("answer one");

        let payload = conv.submit("second").unwrap();
        // greeting, first user, first answer, second user
        assert_eq!(payload.len(), 4);
        assert_eq!(payload[3].content, "second");
        assert_eq!(conv.turns().len(), 5);
    }

    #[test]
    fn test_whitespace_is_trimmed_on_submit() {
        let mut conv = Conversation::new();
        let payload = conv.submit("  hello  ").unwrap();
        assert_eq!(payload.last().unwrap().content, "hello");
    }
}
