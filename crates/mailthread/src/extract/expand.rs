//! Expansion driver
//!
//! Clicks every visible expand affordance once, then waits a fixed settle
//! interval so the host page can render what the clicks revealed. Content
//! that opens after the interval is missed; the wait is not repeated.

use std::time::Duration;

use log::{debug, info};

use super::selectors::{EXPAND_TARGETS, ExpandTarget};
use crate::error::ExtractError;
use crate::view::ThreadView;

/// Number of affordances clicked per target class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    pub clicked: Vec<(&'static str, usize)>,
}

impl ExpansionReport {
    /// Total affordances clicked across all classes
    pub fn total(&self) -> usize {
        self.clicked.iter().map(|(_, n)| n).sum()
    }
}

/// Expand the whole conversation, then suspend for `settle`
pub async fn expand_thread<V: ThreadView + ?Sized>(
    view: &mut V,
    settle: Duration,
) -> Result<ExpansionReport, ExtractError> {
    let report = click_targets(view, EXPAND_TARGETS)?;
    info!(
        "[EXPAND] Clicked {} affordance(s), settling for {}ms",
        report.total(),
        settle.as_millis()
    );

    if !settle.is_zero() {
        tokio::time::sleep(settle).await;
    }

    Ok(report)
}

fn click_targets<V: ThreadView + ?Sized>(
    view: &mut V,
    targets: &[ExpandTarget],
) -> Result<ExpansionReport, ExtractError> {
    let mut report = ExpansionReport::default();
    for target in targets {
        let hits = view.click_all(target.selector)?;
        if hits > 0 {
            debug!("[EXPAND] {}: {}", target.name, hits);
        }
        report.clicked.push((target.name, hits));
    }
    Ok(report)
}
