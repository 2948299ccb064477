//! Thread model representing one extracted conversation

use serde::{Deserialize, Serialize};

use super::Message;

/// Subject used when the conversation heading could not be located
pub const NO_SUBJECT: &str = "No subject found";

/// The result of one extraction run.
///
/// Built fresh per run and never mutated afterwards. `transcript` is always
/// derived from `messages` and is never an independent source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDocument {
    /// Subject line, or [`NO_SUBJECT`]
    pub subject: String,
    /// Deduplicated messages ordered by sort key, display indices 1..=N
    pub messages: Vec<Message>,
    /// All messages rendered as one annotated text blob
    pub transcript: String,
}

impl ThreadDocument {
    /// A document with no messages
    pub fn empty(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            messages: Vec::new(),
            transcript: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages in the thread
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Distinct sender addresses in display order
    pub fn participants(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for email in self.messages.iter().filter_map(|m| m.sender_email.as_deref()) {
            if !seen.contains(&email) {
                seen.push(email);
            }
        }
        seen
    }
}

impl Default for ThreadDocument {
    fn default() -> Self {
        Self::empty(NO_SUBJECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SenderInfo;

    fn with_email(sort_key: usize, email: &str) -> Message {
        Message::builder(sort_key)
            .sender(SenderInfo {
                name: "Someone".to_string(),
                email: Some(email.to_string()),
                timestamp: "Yesterday".to_string(),
            })
            .body("Body long enough to count")
            .build()
    }

    #[test]
    fn test_default_is_empty() {
        let doc = ThreadDocument::default();
        assert_eq!(doc.subject, NO_SUBJECT);
        assert!(doc.is_empty());
        assert_eq!(doc.transcript, "");
    }

    #[test]
    fn test_participants_are_distinct_and_ordered() {
        let mut doc = ThreadDocument::empty("Planning");
        doc.messages = vec![
            with_email(0, "bob@y.com"),
            with_email(1, "alice@x.com"),
            with_email(10, "bob@y.com"),
        ];
        assert_eq!(doc.participants(), vec!["bob@y.com", "alice@x.com"]);
        assert_eq!(doc.message_count(), 3);
    }
}
