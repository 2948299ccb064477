//! Message model representing one extracted email in a thread

use serde::{Deserialize, Serialize};

/// Sender name used when no sender node could be resolved
pub const UNKNOWN_SENDER: &str = "Unknown sender";
/// Timestamp used when no time node could be resolved
pub const UNKNOWN_TIME: &str = "Unknown time";
/// Sender name for a quoted block whose header could not be parsed
pub const PREVIOUS_SENDER: &str = "Previous sender";
/// Timestamp for a quoted block whose header could not be parsed
pub const EARLIER: &str = "Earlier";

/// Best-effort sender and time attribution for a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderInfo {
    /// Display name (e.g., "Alice Smith")
    pub name: String,
    /// Address, if one could be resolved
    pub email: Option<String>,
    /// Free-text timestamp as rendered by the mail client
    pub timestamp: String,
}

impl SenderInfo {
    /// Sentinel attribution for a top-level message
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_SENDER.to_string(),
            email: None,
            timestamp: UNKNOWN_TIME.to_string(),
        }
    }

    /// Sentinel attribution for a quoted block
    pub fn previous() -> Self {
        Self {
            name: PREVIOUS_SENDER.to_string(),
            email: None,
            timestamp: EARLIER.to_string(),
        }
    }

    pub fn has_email(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.is_empty())
    }
}

impl Default for SenderInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// A single email within an extracted thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Synthetic ordering key: `container_index * 10` for a container's own
    /// text, `+ 1, + 2, ...` for quotes discovered inside it
    pub sort_key: usize,
    /// 1-based position after final sort (0 until the thread is assembled)
    pub display_index: usize,
    /// Sender display name
    pub sender: String,
    /// Sender address, if resolved
    pub sender_email: Option<String>,
    /// Free-text timestamp
    pub timestamp: String,
    /// Normalized message text
    pub body: String,
    /// Whether this message was found inside another message's quoted block
    pub is_quoted: bool,
}

impl Message {
    /// Create a new message builder
    pub fn builder(sort_key: usize) -> MessageBuilder {
        MessageBuilder::new(sort_key)
    }

    /// Render this message as one transcript block.
    ///
    /// The email segment is dropped entirely when no address is known, which
    /// leaves two spaces between the sender and the timestamp. Downstream
    /// prompt templates expect exactly this shape.
    pub fn transcript_block(&self) -> String {
        let email = match self.sender_email.as_deref() {
            Some(email) if !email.is_empty() => format!("<{}>", email),
            _ => String::new(),
        };
        format!(
            "\n----- Email {} from {} {} ({}) -----\n\n{}\n\n",
            self.display_index, self.sender, email, self.timestamp, self.body
        )
    }
}

/// Builder for creating Message instances
pub struct MessageBuilder {
    sort_key: usize,
    sender: Option<SenderInfo>,
    body: String,
    is_quoted: bool,
}

impl MessageBuilder {
    fn new(sort_key: usize) -> Self {
        Self {
            sort_key,
            sender: None,
            body: String::new(),
            is_quoted: false,
        }
    }

    pub fn sender(mut self, sender: SenderInfo) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn quoted(mut self, is_quoted: bool) -> Self {
        self.is_quoted = is_quoted;
        self
    }

    pub fn build(self) -> Message {
        let sender = self.sender.unwrap_or_else(|| {
            if self.is_quoted {
                SenderInfo::previous()
            } else {
                SenderInfo::unknown()
            }
        });
        Message {
            sort_key: self.sort_key,
            display_index: 0,
            sender_email: if sender.has_email() { sender.email } else { None },
            sender: sender.name,
            timestamp: sender.timestamp,
            body: self.body,
            is_quoted: self.is_quoted,
        }
    }
}
