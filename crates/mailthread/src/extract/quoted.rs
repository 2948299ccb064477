//! Quoted-block header parsing
//!
//! Each parser recognizes one reply/forward header convention. Parsers are
//! tried in order and the first match wins; text that matches none of them
//! still becomes a quoted message with sentinel attribution.

use serde::{Deserialize, Serialize};

use super::patterns::{DATE_HEADER, FROM_HEADER, ON_WROTE, ON_WROTE_AT, find_email};
use crate::models::{EARLIER, SenderInfo};

/// One prior message recovered from a quoted block, unnormalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedMessage {
    pub sender: SenderInfo,
    pub content: String,
}

/// Recognizes one header convention
type HeaderParser = fn(&str) -> Option<QuotedMessage>;

/// Header conventions in priority order
const HEADER_PARSERS: &[HeaderParser] = &[parse_on_wrote, parse_from_block];

/// Header lines that may follow `Subject:` in a forwarded block
const TRAILING_HEADERS: &[&str] = &["To:", "Cc:"];

/// Parse a quoted block's text into a message, never failing
pub fn parse_quote(text: &str) -> QuotedMessage {
    HEADER_PARSERS
        .iter()
        .find_map(|parse| parse(text))
        .unwrap_or_else(|| parse_bare(text))
}

/// `On <date>, <name> <<email>> wrote:` followed by the body
pub fn parse_on_wrote(text: &str) -> Option<QuotedMessage> {
    let caps = ON_WROTE_AT
        .captures(text)
        .or_else(|| ON_WROTE.captures(text))?;
    let header = caps.get(0)?;

    Some(QuotedMessage {
        sender: SenderInfo {
            name: caps[2].trim().to_string(),
            email: Some(caps[3].to_string()),
            timestamp: caps[1].trim().to_string(),
        },
        content: text[header.end()..].trim().to_string(),
    })
}

/// `From:` / `Date:` / `Subject:` header block followed by the body
pub fn parse_from_block(text: &str) -> Option<QuotedMessage> {
    let from = FROM_HEADER.captures(text)?;

    let timestamp = DATE_HEADER
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| EARLIER.to_string());

    let content = body_after_subject(text).unwrap_or_else(|| text.trim().to_string());

    Some(QuotedMessage {
        sender: SenderInfo {
            name: from[1].trim().to_string(),
            email: Some(from[2].to_string()),
            timestamp,
        },
        content,
    })
}

/// Whole text as the body, address from the first email-shaped substring
pub fn parse_bare(text: &str) -> QuotedMessage {
    let mut sender = SenderInfo::previous();
    sender.email = find_email(text).map(str::to_string);
    QuotedMessage {
        sender,
        content: text.trim().to_string(),
    }
}

fn body_after_subject(text: &str) -> Option<String> {
    let subject_at = text.find("Subject:").filter(|&i| i > 0)?;
    let line_end = subject_at + text[subject_at..].find('\n')?;

    let body: Vec<&str> = text[line_end + 1..]
        .lines()
        .skip_while(|line| {
            let line = line.trim_start();
            TRAILING_HEADERS.iter().any(|h| line.starts_with(h))
        })
        .collect();
    Some(body.join("\n").trim().to_string())
}
