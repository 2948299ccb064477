//! Known Gmail layout selectors
//!
//! Every list is tried in order; earlier entries win.

/// One class of expand affordance in the conversation view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandTarget {
    pub name: &'static str,
    pub selector: &'static str,
}

/// Expand affordances, clicked once each per expansion pass
pub const EXPAND_TARGETS: &[ExpandTarget] = &[
    ExpandTarget {
        name: "trimmed content",
        selector: ".ajz",
    },
    ExpandTarget {
        name: "collapsed message",
        selector: ".h7 .ajR",
    },
    ExpandTarget {
        name: "quoted text",
        selector: ".ajU",
    },
    ExpandTarget {
        name: "details",
        selector: r#"div[data-tooltip="Show details"], span.ajT"#,
    },
    ExpandTarget {
        name: "collapsed reply",
        selector: ".adF",
    },
];

/// Message container layouts: list items, message blocks, message groups,
/// id-bearing messages, legacy table messages
pub const CONTAINER_SELECTORS: &[&str] = &[
    r#"div[role="listitem"]"#,
    "div.adn.ads",
    "div.gs",
    "div[data-message-id]",
    "table.message",
];

/// Stable per-message id attributes, preferred as container dedup keys
pub const MESSAGE_ID_ATTRS: &[&str] = &["data-message-id", "data-legacy-message-id"];

/// Sender nodes, most specific first
pub const SENDER_SELECTORS: &[&str] = &["span.gD", "span[email]", "h3.iw", "[data-hovercard-id]"];

/// Attributes that may carry the sender's address
pub const ADDRESS_ATTRS: &[&str] = &["email", "data-hovercard-id"];

/// Time nodes checked one match each
pub const TIMESTAMP_SELECTORS: &[&str] = &["span.g3", "time"];

/// Time nodes checked for every match
pub const TIMESTAMP_FALLBACK_SELECTOR: &str = ".ad, .date, .timestamp";

/// Content areas holding a message's own text
pub const CONTENT_SELECTORS: &[&str] = &[
    ".a3s.aiL",
    ".a3s",
    r#".ii.gt div[dir="ltr"]"#,
    ".message-body",
    ".adP",
    ".Am.Al.editable",
];

/// Quoted prior-message blocks
pub const QUOTE_SELECTOR: &str = ".gmail_quote, blockquote, .yahoo_quoted";

/// Interface chrome removed when falling back to the whole container
pub const CHROME_SELECTORS: &[&str] = &["button", ".T-I", ".J-J5-Ji"];

/// Conversation subject headings
pub const SUBJECT_SELECTORS: &[&str] = &["h2[data-thread-perm-id]", "h2[data-legacy-thread-id]"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Snapshot;

    #[test]
    fn test_all_selectors_compile() {
        let snap = Snapshot::parse("<div></div>");
        let all = EXPAND_TARGETS
            .iter()
            .map(|t| t.selector)
            .chain(CONTAINER_SELECTORS.iter().copied())
            .chain(SENDER_SELECTORS.iter().copied())
            .chain(TIMESTAMP_SELECTORS.iter().copied())
            .chain([TIMESTAMP_FALLBACK_SELECTOR, QUOTE_SELECTOR])
            .chain(CONTENT_SELECTORS.iter().copied())
            .chain(CHROME_SELECTORS.iter().copied())
            .chain(SUBJECT_SELECTORS.iter().copied());

        for selector in all {
            assert!(snap.select(selector).is_ok(), "selector failed: {}", selector);
        }
    }
}
