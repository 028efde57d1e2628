#![forbid(unsafe_code)]

//! Plain-text outline of a document subtree.
//!
//! One line per element, two spaces of indent per level. Each line reads
//! `tag#id.class.class [attrs] "text"`, with absent parts omitted and
//! ` <focus>` appended to the active element. Attribute order is fixed, so
//! outlines compare stably in tests.

use std::fmt::Write as _;

use folio_dom::{Document, Element, NodeId};

/// Outline of the whole document, body first.
pub fn outline(doc: &Document) -> String {
    outline_of(doc, doc.body())
}

/// Outline of `root` and its descendants. Empty for a stale handle.
pub fn outline_of(doc: &Document, root: NodeId) -> String {
    let mut out = String::new();
    let active = doc.active_element();
    write_node(doc, root, 0, active, &mut out);
    out
}

fn write_node(doc: &Document, node: NodeId, depth: usize, active: Option<NodeId>, out: &mut String) {
    let Some(line) = doc.with_element(node, describe) else {
        return;
    };
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(&line);
    if active == Some(node) {
        out.push_str(" <focus>");
    }
    out.push('\n');
    for child in doc.children(node) {
        write_node(doc, child, depth + 1, active, out);
    }
}

/// Single-line description of one element.
pub fn describe(el: &Element) -> String {
    let mut line = String::from(el.tag.name());
    if let Some(id) = &el.id {
        let _ = write!(line, "#{id}");
    }
    for class in el.class.split_whitespace() {
        let _ = write!(line, ".{class}");
    }

    let mut attrs = Vec::new();
    if let Some(role) = el.aria.role {
        attrs.push(format!("role={}", role.as_str()));
    }
    if el.aria.modal {
        attrs.push("aria-modal".to_owned());
    }
    if let Some(ids) = &el.aria.labelledby {
        attrs.push(format!("labelledby={ids}"));
    }
    if let Some(label) = &el.aria.label {
        attrs.push(format!("aria-label={label:?}"));
    }
    if el.aria.hidden {
        attrs.push("aria-hidden".to_owned());
    }
    if let Some(index) = el.tab_index {
        attrs.push(format!("tabindex={index}"));
    }
    if let Some(href) = &el.href {
        attrs.push(format!("href={href}"));
    }
    if el.disabled {
        attrs.push("disabled".to_owned());
    }
    if !attrs.is_empty() {
        let _ = write!(line, " [{}]", attrs.join(" "));
    }

    if let Some(text) = &el.text {
        let _ = write!(line, " {text:?}");
    }
    line
}

/// Compare a document outline against an expected text block.
///
/// Leading indentation common to all non-blank lines of `expected` is
/// stripped, so the expectation can be written as an indented raw string.
#[macro_export]
macro_rules! assert_outline {
    ($doc:expr, $root:expr, $expected:expr $(,)?) => {{
        let actual = $crate::outline::outline_of(&$doc, $root);
        let expected = $crate::outline::dedent($expected);
        $crate::pretty_assertions::assert_eq!(actual, expected);
    }};
    ($doc:expr, $expected:expr $(,)?) => {{
        let actual = $crate::outline::outline(&$doc);
        let expected = $crate::outline::dedent($expected);
        $crate::pretty_assertions::assert_eq!(actual, expected);
    }};
}

/// Strip common leading whitespace and surrounding blank lines; each kept
/// line ends in `\n`.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |pos| pos + 1);
    let body = &lines[start..end];
    let indent = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = String::new();
    for line in body {
        out.push_str(line.get(indent..).unwrap_or("").trim_end());
        out.push('\n');
    }
    out
}
