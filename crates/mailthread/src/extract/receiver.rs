//! Reply recipient detection
//!
//! Finds the address a generated reply should go to, for the reply request.

use super::patterns::MAILTO;
use crate::error::ExtractError;
use crate::view::{Snapshot, collapse_whitespace};

/// Best guess at the address to reply to.
///
/// Tries, in order: the recipient span Gmail marks on sent mail, the first
/// address span whose display name differs from its address, then the first
/// mailto link.
pub fn receiver_email(snapshot: &Snapshot) -> Result<Option<String>, ExtractError> {
    if let Some(span) = snapshot.select_first("span.g2[email]")?
        && let Some(email) = span.value().attr("email").filter(|e| !e.is_empty())
    {
        return Ok(Some(email.to_string()));
    }

    for span in snapshot.select("span[email]")? {
        let Some(email) = span.value().attr("email").filter(|e| !e.is_empty()) else {
            continue;
        };
        let name = span
            .value()
            .attr("name")
            .map(str::to_string)
            .unwrap_or_else(|| collapse_whitespace(&span.text().collect::<String>()));
        if name != email {
            return Ok(Some(email.to_string()));
        }
    }

    for link in snapshot.select(r#"a[href^="mailto:"]"#)? {
        if let Some(caps) = link.value().attr("href").and_then(|h| MAILTO.captures(h)) {
            return Ok(Some(caps[1].to_string()));
        }
    }

    Ok(None)
}
