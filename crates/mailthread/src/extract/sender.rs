//! Sender and timestamp heuristics
//!
//! Candidate nodes are visited in selector priority order and each node is
//! run through an ordered list of matchers. The first matcher that yields a
//! value wins and later candidates are not consulted.

use scraper::ElementRef;

use super::patterns::find_email;
use super::selectors::{
    ADDRESS_ATTRS, SENDER_SELECTORS, TIMESTAMP_FALLBACK_SELECTOR, TIMESTAMP_SELECTORS,
};
use crate::config::ExtractorSettings;
use crate::error::ExtractError;
use crate::models::SenderInfo;
use crate::view::{collapse_whitespace, select_first_in, select_in};

/// A resolved sender: display name plus optional address
type SenderMatch = (String, Option<String>);

/// Tries to resolve a sender from one candidate node
type SenderMatcher = fn(ElementRef<'_>) -> Option<SenderMatch>;

/// Matchers in priority order
const SENDER_MATCHERS: &[SenderMatcher] = &[from_address_attr, from_email_in_text, from_display_text];

/// Resolve sender name, address and timestamp for one container.
///
/// Missing pieces fall back to the "Unknown sender" / "Unknown time"
/// sentinels.
pub fn extract_sender_info(
    container: ElementRef<'_>,
    settings: &ExtractorSettings,
) -> Result<SenderInfo, ExtractError> {
    let mut info = SenderInfo::unknown();

    if let Some((name, email)) = resolve_sender(container)? {
        info.name = name;
        info.email = email;
    }

    if let Some(timestamp) = resolve_timestamp(container, settings.timestamp_max_chars)? {
        info.timestamp = timestamp;
    }

    Ok(info)
}

fn resolve_sender(container: ElementRef<'_>) -> Result<Option<SenderMatch>, ExtractError> {
    for selector in SENDER_SELECTORS {
        let Some(node) = select_first_in(container, selector)? else {
            continue;
        };
        if let Some(found) = SENDER_MATCHERS.iter().find_map(|matcher| matcher(node)) {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Address carried by an attribute, name from the node's text
fn from_address_attr(node: ElementRef<'_>) -> Option<SenderMatch> {
    let email = ADDRESS_ATTRS
        .iter()
        .filter_map(|attr| node.value().attr(attr))
        .find(|value| value.contains('@'))?;
    let text = node_text(node);
    let name = if text.is_empty() { email.to_string() } else { text };
    Some((name, Some(email.to_string())))
}

/// Address found inside the node's text; the full text is the name
fn from_email_in_text(node: ElementRef<'_>) -> Option<SenderMatch> {
    let text = node_text(node);
    let email = find_email(&text)?.to_string();
    Some((text, Some(email)))
}

/// Display name only
fn from_display_text(node: ElementRef<'_>) -> Option<SenderMatch> {
    let text = node_text(node);
    (!text.is_empty()).then_some((text, None))
}

fn resolve_timestamp(
    container: ElementRef<'_>,
    max_chars: usize,
) -> Result<Option<String>, ExtractError> {
    let mut candidates = Vec::new();
    for selector in TIMESTAMP_SELECTORS {
        candidates.extend(select_first_in(container, selector)?);
    }
    candidates.extend(select_in(container, TIMESTAMP_FALLBACK_SELECTOR)?);

    Ok(candidates
        .into_iter()
        .map(node_text)
        .find(|text| is_plausible_timestamp(text, max_chars)))
}

fn is_plausible_timestamp(text: &str, max_chars: usize) -> bool {
    !text.is_empty() && !text.contains('@') && text.chars().count() < max_chars
}

fn node_text(node: ElementRef<'_>) -> String {
    collapse_whitespace(&node.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UNKNOWN_SENDER, UNKNOWN_TIME};
    use crate::view::Snapshot;

    fn info_for(html: &str) -> SenderInfo {
        let snap = Snapshot::parse(html);
        let container = snap.select_first("#c").unwrap().unwrap();
        extract_sender_info(container, &ExtractorSettings::default()).unwrap()
    }

    #[test]
    fn test_address_attribute() {
        let info = info_for(
            r#"<div id="c"><h3 class="iw"><span class="gD" email="alice@x.com">Alice Smith</span></h3>
               <span class="g3">Jan 5, 2025, 10:02 AM</span></div>"#,
        );
        assert_eq!(info.name, "Alice Smith");
        assert_eq!(info.email.as_deref(), Some("alice@x.com"));
        assert_eq!(info.timestamp, "Jan 5, 2025, 10:02 AM");
    }

    #[test]
    fn test_hovercard_attribute() {
        let info = info_for(
            r#"<div id="c"><span data-hovercard-id="bob@y.org">Bob</span></div>"#,
        );
        assert_eq!(info.name, "Bob");
        assert_eq!(info.email.as_deref(), Some("bob@y.org"));
    }

    #[test]
    fn test_email_in_text() {
        let info = info_for(r#"<div id="c"><h3 class="iw">Carol &lt;carol@z.net&gt;</h3></div>"#);
        assert_eq!(info.name, "Carol <carol@z.net>");
        assert_eq!(info.email.as_deref(), Some("carol@z.net"));
    }

    #[test]
    fn test_display_name_only_wins_first() {
        let info = info_for(
            r#"<div id="c"><span class="gD">Dana</span><span email="other@q.io">Other</span></div>"#,
        );
        assert_eq!(info.name, "Dana");
        assert_eq!(info.email, None);
    }

    #[test]
    fn test_empty_candidate_falls_through() {
        let info = info_for(
            r#"<div id="c"><span class="gD"> </span><h3 class="iw">Erin</h3></div>"#,
        );
        assert_eq!(info.name, "Erin");
    }

    #[test]
    fn test_defaults_when_nothing_matches() {
        let info = info_for(r#"<div id="c"><p>Just text</p></div>"#);
        assert_eq!(info.name, UNKNOWN_SENDER);
        assert_eq!(info.email, None);
        assert_eq!(info.timestamp, UNKNOWN_TIME);
    }

    #[test]
    fn test_timestamp_skips_implausible_candidates() {
        let info = info_for(
            r#"<div id="c">
                 <span class="g3">frank@w.com</span>
                 <time>Tuesday, the fourteenth of February at noon</time>
                 <span class="date"></span>
                 <span class="timestamp">3:15 PM</span>
               </div>"#,
        );
        assert_eq!(info.timestamp, "3:15 PM");
    }
}
