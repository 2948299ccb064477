//! Request bodies for the language-model backend
//!
//! Only the JSON shapes live here. Sending them is the host's job.

use serde::{Deserialize, Serialize};

use crate::models::{Message, ThreadDocument};

/// Body of the thread-analysis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeThreadRequest {
    pub thread: ThreadPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadPayload {
    pub subject: String,
    pub emails: Vec<EmailPayload>,
    pub complete_thread_text: String,
}

/// One message as the backend expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPayload {
    /// Sort key the message was ordered by
    pub index: usize,
    pub sender: String,
    /// Empty when the address is unknown
    pub sender_email: String,
    pub timestamp: String,
    pub full_content: String,
    pub is_quoted: bool,
    pub display_index: usize,
}

impl From<&Message> for EmailPayload {
    fn from(message: &Message) -> Self {
        Self {
            index: message.sort_key,
            sender: message.sender.clone(),
            sender_email: message.sender_email.clone().unwrap_or_default(),
            timestamp: message.timestamp.clone(),
            full_content: message.body.clone(),
            is_quoted: message.is_quoted,
            display_index: message.display_index,
        }
    }
}

impl AnalyzeThreadRequest {
    pub fn from_thread(thread: &ThreadDocument) -> Self {
        Self {
            thread: ThreadPayload {
                subject: thread.subject.clone(),
                emails: thread.messages.iter().map(EmailPayload::from).collect(),
                complete_thread_text: thread.transcript.clone(),
            },
        }
    }
}

/// Body of the reply-generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReplyRequest {
    /// The thread transcript
    pub prompt: String,
    pub use_custom_prompt: bool,
    /// Empty unless `use_custom_prompt` is set
    pub custom_prompt: String,
    /// Address the reply is written on behalf of, empty when unknown
    pub receiver_email: String,
}

impl GenerateReplyRequest {
    /// Build a reply request from a thread transcript.
    ///
    /// A blank custom prompt counts as no custom prompt.
    pub fn new(
        thread: &ThreadDocument,
        receiver_email: Option<&str>,
        custom_prompt: Option<&str>,
    ) -> Self {
        let custom_prompt = custom_prompt
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or_default()
            .to_string();

        Self {
            prompt: thread.transcript.clone(),
            use_custom_prompt: !custom_prompt.is_empty(),
            custom_prompt,
            receiver_email: receiver_email.unwrap_or_default().to_string(),
        }
    }
}
