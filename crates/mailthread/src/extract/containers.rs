//! Container discovery
//!
//! Gathers every node that looks like one message across all known layouts,
//! drops the ones that did not render, and keeps the first node per key.

use std::collections::HashSet;

use log::debug;
use scraper::ElementRef;

use super::selectors::{CONTAINER_SELECTORS, MESSAGE_ID_ATTRS};
use crate::error::ExtractError;
use crate::view::Snapshot;

/// Ordered, deduplicated message containers.
///
/// Order is selector priority first, then document order within a
/// selector. An empty result means there is nothing to extract.
pub fn discover_containers(snapshot: &Snapshot) -> Result<Vec<ElementRef<'_>>, ExtractError> {
    let mut pool = Vec::new();
    for selector in CONTAINER_SELECTORS {
        let found = snapshot.select(selector)?;
        if !found.is_empty() {
            debug!("[CONTAINERS] {} match(es) for {}", found.len(), selector);
        }
        pool.extend(found);
    }

    let mut seen = HashSet::new();
    let containers: Vec<_> = pool
        .into_iter()
        .filter(|el| snapshot.rendered_height(*el) > 0)
        .filter(|el| seen.insert(container_key(snapshot, *el)))
        .collect();

    debug!("[CONTAINERS] {} unique visible container(s)", containers.len());
    Ok(containers)
}

/// Identity of a container: its message id when present, else its position
pub fn container_key(snapshot: &Snapshot, el: ElementRef<'_>) -> String {
    MESSAGE_ID_ATTRS
        .iter()
        .find_map(|attr| el.value().attr(attr).filter(|v| !v.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("pos_{}", snapshot.offset_top(el)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(containers: &[ElementRef<'_>]) -> Vec<String> {
        containers
            .iter()
            .map(|c| c.value().attr("id").unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_empty_document() {
        let snap = Snapshot::parse("<html><body><p>Inbox is empty</p></body></html>");
        assert!(discover_containers(&snap).unwrap().is_empty());
    }

    #[test]
    fn test_selector_priority_then_document_order() {
        let snap = Snapshot::parse(
            r#"<div class="gs" id="g1"></div>
               <div role="listitem" id="l1"></div>
               <div role="listitem" id="l2"></div>
               <table class="message" id="t1"></table>"#,
        );
        let containers = discover_containers(&snap).unwrap();
        assert_eq!(classes(&containers), vec!["l1", "l2", "g1", "t1"]);
    }

    #[test]
    fn test_skips_hidden_containers() {
        let snap = Snapshot::parse(
            r#"<div role="listitem" id="shown"></div>
               <div role="listitem" id="collapsed" style="display:none"></div>
               <div role="listitem" id="zero" data-rendered-height="0"></div>"#,
        );
        let containers = discover_containers(&snap).unwrap();
        assert_eq!(classes(&containers), vec!["shown"]);
    }

    #[test]
    fn test_dedup_by_message_id() {
        let snap = Snapshot::parse(
            r#"<div class="adn ads" id="a" data-message-id="m1"></div>
               <div class="gs" id="b" data-message-id="m1"></div>
               <div data-legacy-message-id="m2" class="gs" id="c"></div>"#,
        );
        let containers = discover_containers(&snap).unwrap();
        assert_eq!(classes(&containers), vec!["a", "c"]);
    }

    #[test]
    fn test_dedup_by_position() {
        let snap = Snapshot::parse(
            r#"<div role="listitem" id="outer" data-offset-top="120">
                 <div class="gs" id="inner" data-offset-top="120"></div>
               </div>
               <div class="gs" id="later" data-offset-top="480"></div>"#,
        );
        let containers = discover_containers(&snap).unwrap();
        assert_eq!(classes(&containers), vec!["outer", "later"]);
    }

    #[test]
    fn test_node_matched_by_two_selectors_kept_once() {
        let snap = Snapshot::parse(r#"<div class="adn ads gs" id="only"></div>"#);
        let containers = discover_containers(&snap).unwrap();
        assert_eq!(classes(&containers), vec!["only"]);
    }
}
