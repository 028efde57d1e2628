#![forbid(unsafe_code)]

//! Accessibility attributes and accessible-name computation.

use crate::document::{Document, NodeId};

/// ARIA role of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Dialog,
    /// Purely presentational; removes implicit semantics.
    Presentation,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dialog => "dialog",
            Self::Presentation => "presentation",
        }
    }
}

/// ARIA attributes carried by an element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aria {
    pub role: Option<Role>,
    pub modal: bool,
    /// Space-separated ids of the elements that label this one.
    pub labelledby: Option<String>,
    pub label: Option<String>,
    /// Hidden from assistive technology.
    pub hidden: bool,
}

impl Document {
    /// Concatenated text of `node` and its descendants in document order.
    pub fn text_content(&self, node: NodeId) -> Option<String> {
        if !self.exists(node) {
            return None;
        }
        let mut out = String::new();
        for id in std::iter::once(node).chain(self.descendants(node)) {
            if let Some(Some(text)) = self.with_element(id, |el| el.text.clone()) {
                out.push_str(&text);
            }
        }
        Some(out)
    }

    /// Accessible name of `node`.
    ///
    /// Resolution order: `aria-labelledby` (referenced elements' text joined
    /// by a space, unresolvable ids skipped), then `aria-label`, then the
    /// element's own text content. Empty results are `None`.
    pub fn accessible_name(&self, node: NodeId) -> Option<String> {
        let aria = self.with_element(node, |el| el.aria.clone())?;

        if let Some(ids) = aria.labelledby.as_deref() {
            let parts: Vec<String> = ids
                .split_whitespace()
                .filter_map(|id| self.element_by_id(id))
                .filter_map(|labelled| self.text_content(labelled))
                .filter(|text| !text.is_empty())
                .collect();
            if !parts.is_empty() {
                return Some(parts.join(" "));
            }
        }

        if let Some(label) = aria.label
            && !label.is_empty()
        {
            return Some(label);
        }

        self.text_content(node).filter(|text| !text.is_empty())
    }
}
