//! Thread assembly

use crate::models::{Message, ThreadDocument};

/// Order messages by sort key, number them 1..=N and render the transcript.
///
/// Performs no filtering; input is expected to be normalized and deduped.
pub fn assemble(subject: String, mut messages: Vec<Message>) -> ThreadDocument {
    messages.sort_by_key(|m| m.sort_key);
    for (i, message) in messages.iter_mut().enumerate() {
        message.display_index = i + 1;
    }

    let transcript = render_transcript(&messages);
    ThreadDocument {
        subject,
        messages,
        transcript,
    }
}

/// Concatenate every message's transcript block in order
pub fn render_transcript(messages: &[Message]) -> String {
    messages.iter().map(Message::transcript_block).collect()
}
