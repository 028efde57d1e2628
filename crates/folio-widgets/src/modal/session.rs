#![forbid(unsafe_code)]

//! Resources held by an open modal, and their teardown.

use folio_dom::{Document, KeySubscription, NodeId, ScrollLock, TimerId, WeakDocument};

/// Nodes of a mounted modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ModalNodes {
    pub(crate) overlay: NodeId,
    pub(crate) dialog: NodeId,
    pub(crate) title: NodeId,
    pub(crate) close_button: Option<NodeId>,
    /// Content region; scope of the focus trap.
    pub(crate) body: NodeId,
}

/// Everything acquired on open. Released exactly once, by [`close`] or drop.
///
/// [`close`]: OpenSession::close
#[derive(Debug)]
pub(crate) struct OpenSession {
    doc: WeakDocument,
    nodes: ModalNodes,
    return_focus: Option<NodeId>,
    restore_focus: bool,
    keys: Option<KeySubscription>,
    scroll: Option<ScrollLock>,
    focus_task: Option<TimerId>,
    closed: bool,
}

impl OpenSession {
    pub(crate) fn new(
        doc: &Document,
        nodes: ModalNodes,
        return_focus: Option<NodeId>,
        restore_focus: bool,
    ) -> Self {
        Self {
            doc: doc.weak(),
            nodes,
            return_focus,
            restore_focus,
            keys: None,
            scroll: None,
            focus_task: None,
            closed: false,
        }
    }

    pub(crate) fn with_keys(mut self, keys: KeySubscription) -> Self {
        self.keys = Some(keys);
        self
    }

    pub(crate) fn with_scroll_lock(mut self, scroll: Option<ScrollLock>) -> Self {
        self.scroll = scroll;
        self
    }

    pub(crate) fn with_focus_task(mut self, task: TimerId) -> Self {
        self.focus_task = Some(task);
        self
    }

    pub(crate) fn nodes(&self) -> &ModalNodes {
        &self.nodes
    }

    pub(crate) fn return_focus(&self) -> Option<NodeId> {
        self.return_focus
    }

    /// Whether this session is mounted in `doc` and its overlay still exists.
    pub(crate) fn is_live_in(&self, doc: &Document) -> bool {
        !self.closed && self.doc.is(doc) && doc.exists(self.nodes.overlay)
    }

    /// Tear down: nodes, key listener, pending focus task, scroll lock,
    /// then focus restoration. Idempotent.
    pub(crate) fn close(&mut self) {
        if std::mem::replace(&mut self.closed, true) {
            return;
        }
        let doc = self.doc.upgrade();

        if let Some(doc) = &doc
            && let Err(err) = doc.remove(self.nodes.overlay)
        {
            tracing::debug!(overlay = %self.nodes.overlay, %err, "modal overlay already removed");
        }
        drop(self.keys.take());
        if let Some(doc) = &doc
            && let Some(task) = self.focus_task.take()
            && doc.clear_timeout(task)
        {
            tracing::trace!("cancelled pending initial focus");
        }
        drop(self.scroll.take());

        let Some(doc) = doc else {
            return;
        };
        if !self.restore_focus {
            return;
        }
        match self.return_focus {
            Some(target) if doc.focus(target) => {
                tracing::debug!(%target, "focus restored");
            }
            Some(target) => {
                tracing::debug!(%target, "return focus target can no longer take focus");
            }
            None => {}
        }
    }
}

impl Drop for OpenSession {
    fn drop(&mut self) {
        self.close();
    }
}
