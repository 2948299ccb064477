//! Parsed document snapshot with emulated layout queries

use scraper::{ElementRef, Html, Selector};

use super::text::inner_text;
use crate::error::ExtractError;

/// Attribute a capturing script may set with the element's rendered height
const HEIGHT_ATTR: &str = "data-rendered-height";
/// Attribute a capturing script may set with the element's vertical offset
const OFFSET_ATTR: &str = "data-offset-top";

/// Immutable copy of a rendered conversation view
#[derive(Debug, Clone)]
pub struct Snapshot {
    html: Html,
}

impl Snapshot {
    /// Parse a full HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The document's root element
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// All elements in the document matching `selector`, in document order
    pub fn select(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, ExtractError> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).collect())
    }

    /// First element in the document matching `selector`
    pub fn select_first(&self, selector: &str) -> Result<Option<ElementRef<'_>>, ExtractError> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).next())
    }

    /// Rendered height of an element.
    ///
    /// Hidden elements (or elements under a hidden ancestor) have no height.
    /// Otherwise the captured height is used when present, else 1.
    pub fn rendered_height(&self, el: ElementRef<'_>) -> u32 {
        if is_hidden_in_tree(el) {
            return 0;
        }
        el.value()
            .attr(HEIGHT_ATTR)
            .and_then(|h| h.trim().parse().ok())
            .unwrap_or(1)
    }

    /// Vertical offset of an element.
    ///
    /// Uses the captured offset when present; otherwise the element's
    /// position in document order, which preserves relative ordering.
    pub fn offset_top(&self, el: ElementRef<'_>) -> u64 {
        if let Some(offset) = el.value().attr(OFFSET_ATTR).and_then(|o| o.trim().parse().ok()) {
            return offset;
        }
        self.root()
            .descendants()
            .filter(|n| n.value().is_element())
            .position(|n| n.id() == el.id())
            .unwrap_or(0) as u64
    }
}

/// A detached copy of one subtree, safe to prune
#[derive(Debug, Clone)]
pub struct Fragment {
    html: Html,
}

impl Fragment {
    /// Copy `el` into a new fragment and remove every node matching any of
    /// `strip` from the copy. The source document is untouched.
    pub fn clone_without(el: ElementRef<'_>, strip: &[&str]) -> Result<Self, ExtractError> {
        let mut html = Html::parse_fragment(&el.html());

        for selector in strip {
            let selector = compile(selector)?;
            let doomed: Vec<_> = html.select(&selector).map(|e| e.id()).collect();
            for id in doomed {
                if let Some(mut node) = html.tree.get_mut(id) {
                    node.detach();
                }
            }
        }

        Ok(Self { html })
    }

    /// innerText of the copied subtree
    pub fn text(&self) -> String {
        inner_text(self.html.root_element())
    }
}

/// All descendants of `scope` matching `selector`, in document order
pub fn select_in<'a>(
    scope: ElementRef<'a>,
    selector: &str,
) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let selector = compile(selector)?;
    Ok(scope.select(&selector).collect())
}

/// First descendant of `scope` matching `selector`
pub fn select_first_in<'a>(
    scope: ElementRef<'a>,
    selector: &str,
) -> Result<Option<ElementRef<'a>>, ExtractError> {
    let selector = compile(selector)?;
    Ok(scope.select(&selector).next())
}

fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Whether the element itself is hidden by attribute or inline style
pub(crate) fn is_hidden(el: ElementRef<'_>) -> bool {
    let element = el.value();
    if element.attr("hidden").is_some() {
        return true;
    }
    element.attr("style").is_some_and(|style| {
        let compact: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        compact.contains("display:none")
    })
}

fn is_hidden_in_tree(el: ElementRef<'_>) -> bool {
    is_hidden(el) || el.ancestors().filter_map(ElementRef::wrap).any(is_hidden)
}
