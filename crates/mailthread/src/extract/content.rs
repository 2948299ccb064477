//! Content splitting
//!
//! Separates a container's own text from the earlier messages it quotes.
//! All reads of text that needs pruning go through a detached copy of the
//! subtree, so the view itself is never modified.

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use super::quoted::{QuotedMessage, parse_quote};
use super::selectors::{CHROME_SELECTORS, CONTENT_SELECTORS, QUOTE_SELECTOR};
use crate::config::ExtractorSettings;
use crate::error::ExtractError;
use crate::models::SenderInfo;
use crate::view::{Fragment, inner_text, select_in};

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Interface strings that leak into whole-container text, longest first
const UI_TEXTS: &[&str] = &[
    "Click here to Reply or Forward",
    "Reply Reply all Forward",
    "Reply all Forward",
    "Reply Forward",
    "Show details",
    "Hide details",
];

/// A container's text split into its own part and its quoted parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    /// The container's own text, quotes removed (may be empty)
    pub visible: String,
    /// Earlier messages found in quoted blocks, in document order
    pub quoted: Vec<QuotedMessage>,
}

/// Split one container into visible text and quoted messages
pub fn split_content(
    container: ElementRef<'_>,
    sender: &SenderInfo,
    settings: &ExtractorSettings,
) -> Result<Split, ExtractError> {
    Ok(Split {
        visible: visible_text(container, sender, settings)?,
        quoted: quoted_messages(container)?,
    })
}

/// The container's own text with quoted blocks stripped.
///
/// Content areas are tried in priority order; the first one with more than
/// `min_body_chars` characters wins. Otherwise the whole container is used
/// with interface chrome removed as well.
pub fn visible_text(
    container: ElementRef<'_>,
    sender: &SenderInfo,
    settings: &ExtractorSettings,
) -> Result<String, ExtractError> {
    for selector in CONTENT_SELECTORS {
        for area in select_in(container, selector)? {
            let text = Fragment::clone_without(area, &[QUOTE_SELECTOR])?.text();
            if text.chars().count() > settings.min_body_chars {
                return Ok(text);
            }
        }
    }

    let strip: Vec<&str> = std::iter::once(QUOTE_SELECTOR)
        .chain(CHROME_SELECTORS.iter().copied())
        .collect();
    let text = Fragment::clone_without(container, &strip)?.text();
    Ok(clean_ui_text(&text, &sender.timestamp))
}

/// Every quoted block in the container, parsed into a message
pub fn quoted_messages(container: ElementRef<'_>) -> Result<Vec<QuotedMessage>, ExtractError> {
    Ok(select_in(container, QUOTE_SELECTOR)?
        .into_iter()
        .map(inner_text)
        .filter(|text| !text.is_empty())
        .map(|text| parse_quote(&text))
        .collect())
}

/// Remove a leading timestamp and known interface strings
pub fn clean_ui_text(content: &str, timestamp: &str) -> String {
    let mut cleaned = content.trim();
    if !timestamp.is_empty()
        && let Some(rest) = cleaned.strip_prefix(timestamp)
    {
        cleaned = rest.trim_start();
    }

    let mut cleaned = cleaned.to_string();
    for text in UI_TEXTS {
        cleaned = cleaned.replace(text, "");
    }

    EXCESS_NEWLINES
        .replace_all(&cleaned, "\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PREVIOUS_SENDER;
    use crate::view::Snapshot;

    fn split(html: &str) -> Split {
        let snap = Snapshot::parse(html);
        let container = snap.select_first("#c").unwrap().unwrap();
        split_content(container, &SenderInfo::unknown(), &ExtractorSettings::default()).unwrap()
    }

    #[test]
    fn test_visible_text_excludes_quotes() {
        let result = split(
            r#"<div id="c"><div class="a3s aiL">Sounds good, thanks!
                 <div class="gmail_quote">On Mon, Jan 5, Alice Smith &lt;alice@x.com&gt; wrote:
                   <blockquote>Let's meet Tuesday.</blockquote></div></div></div>"#,
        );
        assert_eq!(result.visible, "Sounds good, thanks!");
        assert_eq!(result.quoted.len(), 2);
        assert_eq!(result.quoted[0].sender.name, "Alice Smith");
        assert_eq!(result.quoted[0].content, "Let's meet Tuesday.");
        assert_eq!(result.quoted[1].sender.name, PREVIOUS_SENDER);
    }

    #[test]
    fn test_short_content_area_is_skipped() {
        let result = split(
            r#"<div id="c"><div class="a3s">Ok</div>
                 <div class="message-body">This one is long enough to keep.</div></div>"#,
        );
        assert_eq!(result.visible, "This one is long enough to keep.");
    }

    #[test]
    fn test_fallback_strips_chrome() {
        let result = split(
            r#"<div id="c"><button>Reply</button><div class="T-I">More</div>
                 <p>Plain legacy message without a content area.</p>
                 <blockquote>older text that should not appear</blockquote></div>"#,
        );
        assert_eq!(result.visible, "Plain legacy message without a content area.");
        assert_eq!(result.quoted.len(), 1);
    }

    #[test]
    fn test_empty_quote_blocks_are_ignored() {
        let result = split(
            r#"<div id="c"><div class="a3s">A reply that has enough text.<blockquote> </blockquote></div></div>"#,
        );
        assert!(result.quoted.is_empty());
    }

    #[test]
    fn test_clean_ui_text() {
        let cleaned = clean_ui_text(
            "10:42 AM\nThanks for the update.\n\n\n\nReply Reply all Forward\nShow details",
            "10:42 AM",
        );
        assert_eq!(cleaned, "Thanks for the update.");
    }
}
