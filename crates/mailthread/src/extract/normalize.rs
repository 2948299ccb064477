//! Normalization and near-duplicate removal
//!
//! The same message often surfaces twice: once as a container's own text and
//! again as a quoted copy inside a later reply. Candidates are compared by a
//! short case- and whitespace-insensitive signature, and quoted candidates
//! are also checked for prefix containment against everything kept so far.

use std::collections::HashSet;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::config::ExtractorSettings;
use crate::models::{Message, SenderInfo};

static WROTE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(wrote:)[ \t]*(\S)").unwrap());

static GREETING_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Greetings,|(?:Dear|Hello|Hi|Hey)\b,?)[ \t]*(\S)").unwrap()
});

static CLOSING_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Regards,|Sincerely,|Best,|Thanks,|Thank you,)[ \t]*(\S)").unwrap()
});

static URL_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)[ \t]*(https?://)").unwrap());

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A message candidate before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub sort_key: usize,
    pub sender: SenderInfo,
    pub body: String,
    pub is_quoted: bool,
}

/// Reflow extracted text: break after "wrote:", greetings and closings,
/// separate inline URLs from preceding text, and cap blank runs at one line.
pub fn format_body(content: &str) -> String {
    let formatted = WROTE_BREAK.replace_all(content, "${1}\n${2}");
    let formatted = GREETING_BREAK.replace_all(&formatted, "${1}\n${2}");
    let formatted = CLOSING_BREAK.replace_all(&formatted, "${1}\n${2}");
    let formatted = URL_BREAK.replace_all(&formatted, "${1}\n\n${2}");
    EXCESS_NEWLINES
        .replace_all(&formatted, "\n\n")
        .trim()
        .to_string()
}

/// Dedup signature: the first `chars` characters, lower-cased, with
/// whitespace runs collapsed to single spaces
pub fn signature(body: &str, chars: usize) -> String {
    WHITESPACE_RUN
        .replace_all(&prefix(body, chars).to_lowercase(), " ")
        .into_owned()
}

/// Normalize every candidate and drop noise and duplicates.
///
/// Candidates are visited in pool order; the first copy of a message wins.
/// Survivors keep their provisional sort keys and have no display index yet.
pub fn normalize_and_dedupe(pool: Vec<Candidate>, settings: &ExtractorSettings) -> Vec<Message> {
    let mut seen = HashSet::new();
    let mut kept: Vec<Message> = Vec::new();

    for candidate in pool {
        let body = format_body(&candidate.body);

        if body.chars().count() <= settings.min_body_chars {
            debug!("[DEDUP] dropping short candidate at key {}", candidate.sort_key);
            continue;
        }

        if candidate.is_quoted && is_contained_copy(&body, &kept, settings.containment_chars) {
            debug!("[DEDUP] dropping quoted copy at key {}", candidate.sort_key);
            continue;
        }

        let sig = signature(&body, settings.signature_chars);
        if sig.chars().count() <= settings.signature_min_chars || !seen.insert(sig) {
            debug!("[DEDUP] dropping duplicate at key {}", candidate.sort_key);
            continue;
        }

        kept.push(
            Message::builder(candidate.sort_key)
                .sender(candidate.sender)
                .body(body)
                .quoted(candidate.is_quoted)
                .build(),
        );
    }

    kept
}

/// Whether `body` and any kept message contain each other's opening text
fn is_contained_copy(body: &str, kept: &[Message], chars: usize) -> bool {
    let head = prefix(body, chars);
    kept.iter()
        .any(|m| m.body.contains(head) || body.contains(prefix(&m.body, chars)))
}

/// The first `chars` characters of `s`
fn prefix(s: &str, chars: usize) -> &str {
    s.char_indices().nth(chars).map_or(s, |(i, _)| &s[..i])
}
