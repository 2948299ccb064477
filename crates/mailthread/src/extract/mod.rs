//! Thread extraction pipeline
//!
//! Stages, in the order they run:
//! 1. Expansion driver: open collapsed regions, wait for the view to settle
//! 2. Container discovery: find one node per message
//! 3. Per container: sender/timestamp heuristics and content splitting
//! 4. Normalization and near-duplicate removal across all containers
//! 5. Assembly into an ordered `ThreadDocument`
//!
//! Only stage 1 suspends. Everything after it is a synchronous,
//! deterministic function of the snapshot.

mod assemble;
mod containers;
mod content;
mod expand;
mod normalize;
mod patterns;
mod quoted;
mod receiver;
mod selectors;
mod sender;

pub use assemble::{assemble, render_transcript};
pub use containers::{container_key, discover_containers};
pub use content::{Split, clean_ui_text, quoted_messages, split_content, visible_text};
pub use expand::{ExpansionReport, expand_thread};
pub use normalize::{Candidate, format_body, normalize_and_dedupe, signature};
pub use quoted::{QuotedMessage, parse_bare, parse_from_block, parse_on_wrote, parse_quote};
pub use receiver::receiver_email;
pub use selectors::{EXPAND_TARGETS, ExpandTarget};
pub use sender::extract_sender_info;

use log::{info, warn};
use scraper::ElementRef;

use selectors::SUBJECT_SELECTORS;

use crate::config::ExtractorSettings;
use crate::error::ExtractError;
use crate::models::{NO_SUBJECT, ThreadDocument};
use crate::view::{Snapshot, ThreadView, collapse_whitespace};

/// Sort keys reserved per container
const KEY_STRIDE: usize = 10;

/// Expand the view, wait for it to settle, then extract the thread.
///
/// A view with no recognizable messages yields an empty document, not an
/// error. Errors mean the view itself could not be read.
pub async fn extract_thread<V: ThreadView + ?Sized>(
    view: &mut V,
    settings: &ExtractorSettings,
) -> Result<ThreadDocument, ExtractError> {
    expand_thread(view, settings.settle()).await?;
    let snapshot = view.snapshot()?;
    extract_from_snapshot(&snapshot, settings)
}

/// Extract the thread from an already expanded snapshot.
///
/// Running this twice on the same snapshot yields identical documents.
pub fn extract_from_snapshot(
    snapshot: &Snapshot,
    settings: &ExtractorSettings,
) -> Result<ThreadDocument, ExtractError> {
    let subject = extract_subject(snapshot)?;

    let containers = discover_containers(snapshot)?;
    if containers.is_empty() {
        info!("[EXTRACT] No message containers found");
        return Ok(ThreadDocument::empty(subject));
    }

    let pool = collect_candidates(&containers, settings)?;
    let pool_size = pool.len();
    let messages = normalize_and_dedupe(pool, settings);
    let thread = assemble(subject, messages);

    info!(
        "[EXTRACT] {} container(s), {} candidate(s), {} message(s) kept",
        containers.len(),
        pool_size,
        thread.message_count()
    );
    Ok(thread)
}

/// Conversation subject, or the "No subject found" sentinel
pub fn extract_subject(snapshot: &Snapshot) -> Result<String, ExtractError> {
    for selector in SUBJECT_SELECTORS {
        if let Some(heading) = snapshot.select_first(selector)? {
            let text = collapse_whitespace(&heading.text().collect::<String>());
            if !text.is_empty() {
                return Ok(text);
            }
        }
    }
    Ok(NO_SUBJECT.to_string())
}

/// Raw candidates from every container, in discovery order.
///
/// Container `i` contributes its own text at key `i * 10` and its quoted
/// blocks at `i * 10 + 1`, `i * 10 + 2`, ...
fn collect_candidates(
    containers: &[ElementRef<'_>],
    settings: &ExtractorSettings,
) -> Result<Vec<Candidate>, ExtractError> {
    let mut pool = Vec::new();

    for (i, container) in containers.iter().enumerate() {
        let base = i * KEY_STRIDE;
        let sender = extract_sender_info(*container, settings)?;
        let split = split_content(*container, &sender, settings)?;

        if split.quoted.len() > settings.max_quotes_per_container {
            warn!(
                "[EXTRACT] Container {} holds {} quoted blocks; ordering past {} may interleave with the next container",
                i,
                split.quoted.len(),
                settings.max_quotes_per_container
            );
        }

        if !split.visible.is_empty() {
            pool.push(Candidate {
                sort_key: base,
                sender,
                body: split.visible,
                is_quoted: false,
            });
        }

        for (j, quote) in split.quoted.into_iter().enumerate() {
            pool.push(Candidate {
                sort_key: base + j + 1,
                sender: quote.sender,
                body: quote.content,
                is_quoted: true,
            });
        }
    }

    Ok(pool)
}
