//! Text patterns used by the extraction heuristics
//!
//! Kept apart from the code that applies them so each can be tested alone.

use std::sync::LazyLock;

use regex::Regex;

/// Shared address shape: local@domain.tld
macro_rules! email_shape {
    () => {
        r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9._-]+"
    };
}

/// Any email-shaped substring
pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!("(", email_shape!(), ")")).unwrap());

/// `On <date>, <name> <<email>> wrote:`
///
/// The date is greedy within the line so that commas inside it stay with the
/// date and the name is whatever follows the last comma.
pub static ON_WROTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\bOn (.+), ([^,<\n]+?) <(",
        email_shape!(),
        r")>\s*wrote:"
    ))
    .unwrap()
});

/// `On <date> at <time> <name> <<email>> wrote:`, the Gmail form where no
/// comma separates the time from the name
pub static ON_WROTE_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\bOn ([^\n]+?\bat \d{1,2}:\d{2}(?:\s?[AaPp]\.?[Mm]\.?)?),? ([^<\n]+?) <(",
        email_shape!(),
        r")>\s*wrote:"
    ))
    .unwrap()
});

/// `From: <name> <<email>>` header line of a forwarded or legacy quote
pub static FROM_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(r"From:[ \t]*([^<\n]+?)[ \t]*<(", email_shape!(), r")>")).unwrap()
});

/// `Date: ...` header line
pub static DATE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Date:[ \t]*([^\r\n]+?)[ \t]*\r?\n").unwrap());

/// Address part of a mailto link
pub static MAILTO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^mailto:([^?]+)").unwrap());

/// First email-shaped substring of `text`
pub fn find_email(text: &str) -> Option<&str> {
    EMAIL.find(text).map(|m| m.as_str())
}
