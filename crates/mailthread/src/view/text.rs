//! innerText-style rendering of element subtrees

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Node};

use super::snapshot::is_hidden;

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Elements whose content never renders as text
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "head", "title", "template", "noscript", "meta", "link",
];

/// Elements that start and end on their own line
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "dd", "div", "dl", "dt",
    "fieldset", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "pre", "section", "table", "tbody",
    "thead", "tfoot", "tr", "ul",
];

/// Render the visible text of an element roughly the way a browser's
/// `innerText` does: whitespace runs collapse, block elements and `<br>`
/// break lines, paragraphs are separated by a blank line, and hidden
/// subtrees are skipped.
pub fn inner_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_children(el, &mut out);
    tidy(&out)
}

/// Collapse every whitespace run to one space and trim
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

fn push_children(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => push_inline(out, text),
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = child_el.value().name();
                if SKIPPED_TAGS.contains(&name) || is_hidden(child_el) {
                    continue;
                }
                match name {
                    "br" => out.push('\n'),
                    "p" => {
                        line_break(out);
                        push_children(child_el, out);
                        line_break(out);
                        out.push('\n');
                    }
                    "td" | "th" => {
                        push_children(child_el, out);
                        out.push(' ');
                    }
                    _ if BLOCK_TAGS.contains(&name) => {
                        line_break(out);
                        push_children(child_el, out);
                        line_break(out);
                    }
                    _ => push_children(child_el, out),
                }
            }
            _ => {}
        }
    }
}

fn push_inline(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_whitespace() {
            if !(out.is_empty() || out.ends_with(' ') || out.ends_with('\n')) {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
}

fn line_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn tidy(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(str::trim).collect();
    let joined = lines.join("\n");
    EXCESS_NEWLINES
        .replace_all(joined.trim(), "\n\n")
        .into_owned()
}
