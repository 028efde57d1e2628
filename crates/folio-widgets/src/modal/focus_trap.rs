#![forbid(unsafe_code)]

//! Focus trap over a dialog's content region.
//!
//! The focusable set is recomputed on every query; content may change while
//! the dialog is open. Membership mirrors the classic selector
//! `a[href], button:not([disabled]), textarea, input, select,
//! [tabindex]:not([tabindex="-1"])`, minus anything disabled or
//! `aria-hidden`.
//!
//! # Invariants
//!
//! - Every Tab / Shift+Tab handled by [`FocusTrap::handle_tab`] lands on a
//!   node inside the container: a member of the set, or the container
//!   itself when the set is empty.
//! - Focus outside the set (container, header chrome, or the page behind)
//!   enters at the first member going forward and the last going backward.
//! - Focus inside another open `aria-modal` dialog belongs to that dialog's
//!   trap; [`FocusTrap::owns_focus`] is false there.

use folio_core::TabDirection;
use folio_dom::{Document, Element, NodeId, Role, Tag};

fn matches_focusable_selector(el: &Element) -> bool {
    let native = match el.tag {
        Tag::A => el.href.is_some(),
        Tag::Button => !el.disabled,
        Tag::Textarea | Tag::Input | Tag::Select => true,
        Tag::Body | Tag::Div | Tag::Span | Tag::P => false,
    };
    native || el.tab_index.is_some_and(|index| index != -1)
}

fn is_trap_member(el: &Element) -> bool {
    matches_focusable_selector(el) && !el.disabled && !el.aria.hidden
}

fn is_modal_dialog(el: &Element) -> bool {
    el.aria.role == Some(Role::Dialog) && el.aria.modal
}

/// Focusable descendants of `scope`, in document order.
pub fn focusable_elements(doc: &Document, scope: NodeId) -> Vec<NodeId> {
    doc.descendants(scope)
        .into_iter()
        .filter(|&node| doc.with_element(node, is_trap_member).unwrap_or(false))
        .collect()
}

/// Where a trapped Tab sent focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Moved to the adjacent member.
    Moved(NodeId),
    /// Wrapped from one end of the set to the other.
    Wrapped(NodeId),
    /// Focus was outside the set and entered it.
    Entered(NodeId),
    /// Empty set; focus pinned on the container.
    Pinned,
}

impl TrapOutcome {
    /// The node focus was sent to, `None` for [`TrapOutcome::Pinned`].
    pub fn target(self) -> Option<NodeId> {
        match self {
            Self::Moved(node) | Self::Wrapped(node) | Self::Entered(node) => Some(node),
            Self::Pinned => None,
        }
    }
}

/// Focus trap bound to a dialog container and its content region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTrap {
    container: NodeId,
    scope: NodeId,
}

impl FocusTrap {
    /// `container` is the fallback focus target; `scope` is the subtree
    /// whose focusable elements form the cycle.
    pub const fn new(container: NodeId, scope: NodeId) -> Self {
        Self { container, scope }
    }

    pub const fn container(&self) -> NodeId {
        self.container
    }

    pub const fn scope(&self) -> NodeId {
        self.scope
    }

    pub fn focusables(&self, doc: &Document) -> Vec<NodeId> {
        focusable_elements(doc, self.scope)
    }

    /// Place initial focus: first member, else the container.
    ///
    /// Returns the node that received focus, `None` if the container is gone.
    pub fn focus_initial(&self, doc: &Document) -> Option<NodeId> {
        let target = self
            .focusables(doc)
            .first()
            .copied()
            .unwrap_or(self.container);
        doc.focus(target).then_some(target)
    }

    /// Whether the current focus position is this trap's to move.
    ///
    /// True with focus on the body, inside the container, or anywhere not
    /// enclosed by another modal dialog.
    pub fn owns_focus(&self, doc: &Document) -> bool {
        let Some(active) = doc.active_element() else {
            return true;
        };
        if doc.contains(self.container, active) {
            return true;
        }
        let mut cursor = Some(active);
        while let Some(node) = cursor {
            if doc.with_element(node, is_modal_dialog).unwrap_or(false) {
                return false;
            }
            cursor = doc.parent(node);
        }
        true
    }

    /// Move focus for a Tab press. The caller suppresses the default action.
    pub fn handle_tab(&self, doc: &Document, direction: TabDirection) -> TrapOutcome {
        let set = self.focusables(doc);
        let (Some(&first), Some(&last)) = (set.first(), set.last()) else {
            doc.focus(self.container);
            return TrapOutcome::Pinned;
        };

        let position = doc
            .active_element()
            .and_then(|active| set.iter().position(|&node| node == active));

        let outcome = match (direction, position) {
            (TabDirection::Forward, None) => TrapOutcome::Entered(first),
            (TabDirection::Backward, None) => TrapOutcome::Entered(last),
            (TabDirection::Forward, Some(pos)) if pos + 1 == set.len() => {
                TrapOutcome::Wrapped(first)
            }
            (TabDirection::Backward, Some(0)) => TrapOutcome::Wrapped(last),
            (TabDirection::Forward, Some(pos)) => TrapOutcome::Moved(set[pos + 1]),
            (TabDirection::Backward, Some(pos)) => TrapOutcome::Moved(set[pos - 1]),
        };
        if let Some(target) = outcome.target() {
            doc.focus(target);
        }
        outcome
    }
}
