//! HTML cleaning for indexing and scanning.
//!
//! Script and style elements are dropped with their whole subtree; every
//! other text node is kept in document order.

use scraper::{Html, Node};

/// Elements whose content never counts as page text
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style"];

/// Clean raw HTML into normalized plain text.
///
/// Absent input stays absent. Otherwise script/style subtrees are removed,
/// the remaining text nodes are concatenated, whitespace runs collapse to a
/// single space and the result is trimmed.
#[must_use]
pub fn clean_text(html: Option<&str>) -> Option<String> {
    let html = html?;
    let document = Html::parse_document(html);

    let mut raw = String::with_capacity(html.len() / 2);
    for text in text_nodes(&document) {
        raw.push_str(text);
    }

    Some(normalize_whitespace(&raw))
}

/// Extract visible text from stored content.
///
/// Each text node is trimmed, empty nodes are dropped and the rest are
/// joined with one space. Used by the occurrence scanner on stored content,
/// independently of the strip done at index time.
#[must_use]
pub fn visible_text(content: &str) -> String {
    let fragment = Html::parse_fragment(content);

    text_nodes(&fragment)
        .into_iter()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collect text nodes in document order, skipping non-content subtrees
fn text_nodes(document: &Html) -> Vec<&str> {
    let mut texts = Vec::new();
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => texts.push(&**text),
            Node::Element(element) if NON_CONTENT_ELEMENTS.contains(&element.name()) => {}
            _ => stack.extend(node.children().rev()),
        }
    }

    texts
}

#[inline]
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
