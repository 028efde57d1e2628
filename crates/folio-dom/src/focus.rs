#![forbid(unsafe_code)]

//! Focus pointer and sequential (Tab) navigation.
//!
//! - *Focusable*: may receive focus programmatically. Natively focusable
//!   tags, or any element with an explicit tab index, provided it is
//!   connected and not disabled.
//! - *Tabbable*: focusable and reachable by Tab, i.e. tab index absent or
//!   non-negative.
//!
//! Sequential order is plain document order; positive tab indices are not
//! hoisted ahead of the rest.

use folio_core::TabDirection;

use crate::document::{Document, NodeId, Tree};

pub(crate) fn focusable_in(tree: &Tree, node: NodeId) -> bool {
    let Some(data) = tree.get(node) else {
        return false;
    };
    let el = &data.element;
    if el.is_disabled() || !tree.is_connected(node) {
        return false;
    }
    el.tab_index.is_some() || el.is_natively_focusable()
}

fn tabbable_in(tree: &Tree, node: NodeId) -> bool {
    focusable_in(tree, node)
        && tree
            .get(node)
            .is_some_and(|n| n.element.tab_index.is_none_or(|index| index >= 0))
}

impl Document {
    /// The focused element; `None` when the body has focus.
    pub fn active_element(&self) -> Option<NodeId> {
        self.read(|tree| tree.active.filter(|&node| tree.get(node).is_some()))
    }

    pub fn is_focusable(&self, node: NodeId) -> bool {
        self.read(|tree| focusable_in(tree, node))
    }

    pub fn is_tabbable(&self, node: NodeId) -> bool {
        self.read(|tree| tabbable_in(tree, node))
    }

    /// Move focus to `node`.
    ///
    /// Returns `false` and leaves focus untouched when `node` is stale,
    /// detached, disabled, or not focusable.
    pub fn focus(&self, node: NodeId) -> bool {
        let accepted = self.write(|tree| {
            if focusable_in(tree, node) {
                tree.active = Some(node);
                true
            } else {
                false
            }
        });
        if accepted {
            tracing::trace!(%node, "focus moved");
        } else {
            tracing::trace!(%node, "focus rejected");
        }
        accepted
    }

    /// Return focus to the body.
    pub fn blur(&self) {
        self.write(|tree| tree.active = None);
    }

    /// Default Tab action: move to the next/previous tabbable element,
    /// wrapping at either end.
    ///
    /// With no active element, forward lands on the first tabbable and
    /// backward on the last. When focus sits on a non-tabbable element the
    /// search starts from its document position. Returns the newly focused
    /// element, or `None` if the document has no tabbable elements.
    pub fn focus_sequential(&self, direction: TabDirection) -> Option<NodeId> {
        let target = self.read(|tree| {
            let order = tree.descendants(tree.body());
            let tabbable: Vec<usize> = order
                .iter()
                .enumerate()
                .filter(|&(_, &node)| tabbable_in(tree, node))
                .map(|(pos, _)| pos)
                .collect();
            if tabbable.is_empty() {
                return None;
            }
            let current = tree
                .active
                .and_then(|active| order.iter().position(|&node| node == active));
            let pick = match (direction, current) {
                (TabDirection::Forward, None) => tabbable[0],
                (TabDirection::Backward, None) => tabbable[tabbable.len() - 1],
                (TabDirection::Forward, Some(cur)) => tabbable
                    .iter()
                    .copied()
                    .find(|&pos| pos > cur)
                    .unwrap_or(tabbable[0]),
                (TabDirection::Backward, Some(cur)) => tabbable
                    .iter()
                    .rev()
                    .copied()
                    .find(|&pos| pos < cur)
                    .unwrap_or(tabbable[tabbable.len() - 1]),
            };
            Some(order[pick])
        })?;
        self.focus(target).then_some(target)
    }
}
