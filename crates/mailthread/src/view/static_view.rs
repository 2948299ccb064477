//! View over fixed markup

use log::debug;

use super::{Snapshot, ThreadView};
use crate::error::ExtractError;

/// A [`ThreadView`] backed by markup that does not change.
///
/// Clicks are recorded but have no effect, so a saved page must already
/// contain any content that expansion would reveal.
#[derive(Debug, Clone)]
pub struct StaticView {
    snapshot: Snapshot,
    location: Option<String>,
    clicks: Vec<(String, usize)>,
}

impl StaticView {
    /// Create a view over the given HTML document
    pub fn new(html: &str) -> Self {
        Self {
            snapshot: Snapshot::parse(html),
            location: None,
            clicks: Vec::new(),
        }
    }

    /// Attach the URL or hash the markup was captured from
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Every `click_all` call so far, with the number of elements it hit
    pub fn clicks(&self) -> &[(String, usize)] {
        &self.clicks
    }
}

impl ThreadView for StaticView {
    fn click_all(&mut self, selector: &str) -> Result<usize, ExtractError> {
        let hits = self.snapshot.select(selector)?.len();
        debug!("[VIEW] click {} -> {} element(s)", selector, hits);
        self.clicks.push((selector.to_string(), hits));
        Ok(hits)
    }

    fn snapshot(&self) -> Result<Snapshot, ExtractError> {
        Ok(self.snapshot.clone())
    }

    fn location(&self) -> Option<String> {
        self.location.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_all_records_hits() {
        let mut view = StaticView::new(r#"<span class="ajz"></span><span class="ajz"></span>"#);
        assert_eq!(view.click_all(".ajz").unwrap(), 2);
        assert_eq!(view.click_all(".adF").unwrap(), 0);
        assert_eq!(
            view.clicks(),
            &[(".ajz".to_string(), 2), (".adF".to_string(), 0)]
        );
    }

    #[test]
    fn test_location() {
        let view = StaticView::new("<p></p>").with_location("#inbox/FMfcgz");
        assert_eq!(view.location().as_deref(), Some("#inbox/FMfcgz"));
    }
}
