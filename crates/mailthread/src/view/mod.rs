//! Rendered document abstraction
//!
//! This module provides:
//! - The `ThreadView` trait: a handle to the live conversation view
//! - `Snapshot`: an immutable parsed copy of the view that extraction reads
//! - `StaticView`: a view over fixed markup (saved pages, tests)
//! - innerText-style text rendering

mod snapshot;
mod static_view;
mod text;

pub use snapshot::{Fragment, Snapshot, select_first_in, select_in};
pub use static_view::StaticView;
pub use text::{collapse_whitespace, inner_text};

use crate::error::ExtractError;

/// Handle to a rendered conversation view.
///
/// Extraction only mutates the view through [`ThreadView::click_all`]; all
/// reads go through a [`Snapshot`].
pub trait ThreadView {
    /// Activate every element matching `selector`, returning how many were hit.
    ///
    /// Zero matches is not an error.
    fn click_all(&mut self, selector: &str) -> Result<usize, ExtractError>;

    /// Capture the current document state
    fn snapshot(&self) -> Result<Snapshot, ExtractError>;

    /// URL or hash of the view, if known
    fn location(&self) -> Option<String> {
        None
    }
}

impl<T: ThreadView + ?Sized> ThreadView for &mut T {
    fn click_all(&mut self, selector: &str) -> Result<usize, ExtractError> {
        (**self).click_all(selector)
    }

    fn snapshot(&self) -> Result<Snapshot, ExtractError> {
        (**self).snapshot()
    }

    fn location(&self) -> Option<String> {
        (**self).location()
    }
}
