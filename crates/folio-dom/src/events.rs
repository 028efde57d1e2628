#![forbid(unsafe_code)]

//! Event listeners and dispatch.
//!
//! Two listener kinds exist:
//!
//! - **Window key listeners**: receive every key event, in registration
//!   order. Registered through [`Document::add_key_listener`], which hands
//!   back a [`KeySubscription`] that unregisters on drop.
//! - **Element pointer handlers**: `mousedown` / `click` handlers attached
//!   to a node. Dispatch bubbles from the target to the root and stops
//!   after the node on which a handler called
//!   [`PointerEvent::stop_propagation`].
//!
//! # Invariants
//!
//! 1. Dispatch works from a snapshot of listener ids; a listener removed
//!    mid-dispatch does not run, one added mid-dispatch runs from the next
//!    event on.
//! 2. Default actions run after all listeners, and only when no listener
//!    called `prevent_default`.
//!
//! # Default Actions
//!
//! | Event | Default |
//! |-------|---------|
//! | Tab / Shift+Tab | [`Document::focus_sequential`] |
//! | mousedown | focus nearest focusable inclusive ancestor, else blur |
//! | click | none |

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use folio_core::{KeyEvent, MouseEvent};

use crate::document::{Document, NodeId, Tree};
use crate::error::{DomError, Result};

/// Window-level key listener.
pub type KeyHandler = Rc<dyn Fn(&Document, &mut KeyboardEvent)>;
/// Element-level pointer handler.
pub type PointerHandler = Rc<dyn Fn(&Document, &mut PointerEvent)>;

/// Identifier of a registered key listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Default)]
pub(crate) struct ListenerTable {
    next: u64,
    entries: Vec<(ListenerId, KeyHandler)>,
}

impl ListenerTable {
    fn insert(&mut self, handler: KeyHandler) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.entries.push((id, handler));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    fn get(&self, id: ListenerId) -> Option<KeyHandler> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, handler)| Rc::clone(handler))
    }

    fn ids(&self) -> Vec<ListenerId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Default)]
pub(crate) struct ElementHandlers {
    mouse_down: Vec<PointerHandler>,
    click: Vec<PointerHandler>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerKind {
    MouseDown,
    Click,
}

impl PointerKind {
    fn handlers(self, handlers: &ElementHandlers) -> &[PointerHandler] {
        match self {
            Self::MouseDown => &handlers.mouse_down,
            Self::Click => &handlers.click,
        }
    }

    fn handlers_mut(self, handlers: &mut ElementHandlers) -> &mut Vec<PointerHandler> {
        match self {
            Self::MouseDown => &mut handlers.mouse_down,
            Self::Click => &mut handlers.click,
        }
    }

    fn mouse(self) -> MouseEvent {
        match self {
            Self::MouseDown => MouseEvent::left_down(),
            Self::Click => MouseEvent::left_up(),
        }
    }
}

/// Key event as seen by listeners.
#[derive(Debug, Clone)]
pub struct KeyboardEvent {
    key: KeyEvent,
    default_prevented: bool,
}

impl KeyboardEvent {
    fn new(key: KeyEvent) -> Self {
        Self {
            key,
            default_prevented: false,
        }
    }

    pub fn key(&self) -> &KeyEvent {
        &self.key
    }

    /// Suppress the default action (e.g. sequential focus on Tab).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Pointer event as seen by element handlers.
#[derive(Debug, Clone)]
pub struct PointerEvent {
    mouse: MouseEvent,
    target: NodeId,
    current_target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    pub fn mouse(&self) -> &MouseEvent {
        &self.mouse
    }

    /// The node the pointer hit.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The node whose handler is running.
    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop bubbling after the current node's handlers.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// What happened during a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Number of handlers invoked.
    pub handled: usize,
    pub default_prevented: bool,
}

/// RAII registration of a window key listener.
///
/// Dropping the subscription unregisters the listener. After the document
/// itself is gone, release is a no-op.
#[must_use = "dropping a KeySubscription immediately unregisters the listener"]
pub struct KeySubscription {
    doc: Weak<RefCell<Tree>>,
    id: ListenerId,
    active: bool,
}

impl KeySubscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered by this subscription.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Unregister now. Returns `true` if a listener was removed.
    pub fn unsubscribe(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if !std::mem::replace(&mut self.active, false) {
            return false;
        }
        let Some(doc) = Document::upgrade(&self.doc) else {
            return false;
        };
        let removed = doc.remove_key_listener(self.id);
        tracing::trace!(listener = self.id.0, removed, "key listener released");
        removed
    }
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for KeySubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySubscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

impl Document {
    /// Register a window key listener.
    pub fn add_key_listener(
        &self,
        handler: impl Fn(&Document, &mut KeyboardEvent) + 'static,
    ) -> KeySubscription {
        let id = self.write(|tree| tree.listeners.insert(Rc::new(handler)));
        tracing::trace!(listener = id.0, "key listener installed");
        KeySubscription {
            doc: self.downgrade(),
            id,
            active: true,
        }
    }

    /// Unregister a key listener by id. Returns `false` if it was not present.
    pub fn remove_key_listener(&self, id: ListenerId) -> bool {
        self.write(|tree| tree.listeners.remove(id))
    }

    /// Number of registered window key listeners.
    pub fn key_listener_count(&self) -> usize {
        self.read(|tree| tree.listeners.len())
    }

    /// Dispatch a key event to window listeners, then run the default action.
    pub fn dispatch_key(&self, key: KeyEvent) -> DispatchOutcome {
        let mut event = KeyboardEvent::new(key);
        let mut handled = 0;
        for id in self.read(|tree| tree.listeners.ids()) {
            let Some(handler) = self.read(|tree| tree.listeners.get(id)) else {
                continue;
            };
            handler(self, &mut event);
            handled += 1;
        }

        if !event.default_prevented
            && let Some(direction) = key.tab_direction()
        {
            self.focus_sequential(direction);
        }

        DispatchOutcome {
            handled,
            default_prevented: event.default_prevented,
        }
    }

    /// Attach a `mousedown` handler to `node`.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for a stale handle.
    pub fn on_mouse_down(
        &self,
        node: NodeId,
        handler: impl Fn(&Document, &mut PointerEvent) + 'static,
    ) -> Result<()> {
        self.attach(node, PointerKind::MouseDown, Rc::new(handler))
    }

    /// Attach a `click` handler to `node`.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for a stale handle.
    pub fn on_click(
        &self,
        node: NodeId,
        handler: impl Fn(&Document, &mut PointerEvent) + 'static,
    ) -> Result<()> {
        self.attach(node, PointerKind::Click, Rc::new(handler))
    }

    fn attach(&self, node: NodeId, kind: PointerKind, handler: PointerHandler) -> Result<()> {
        self.write(|tree| {
            let data = tree.get_mut(node).ok_or(DomError::UnknownNode(node))?;
            kind.handlers_mut(&mut data.handlers).push(handler);
            Ok(())
        })
    }

    /// Press the primary button on `target`.
    ///
    /// Bubbles `mousedown` handlers, then (unless prevented) moves focus to
    /// the nearest focusable inclusive ancestor of the target, or to the
    /// body when there is none. A target removed by a handler gets no
    /// default action.
    pub fn mouse_down(&self, target: NodeId) -> DispatchOutcome {
        let outcome = self.bubble(target, PointerKind::MouseDown);
        if !outcome.default_prevented && self.exists(target) {
            let focus_target = self.read(|tree| {
                let mut cursor = Some(target);
                while let Some(node) = cursor {
                    if crate::focus::focusable_in(tree, node) {
                        return Some(node);
                    }
                    cursor = tree.get(node).and_then(|n| n.parent);
                }
                None
            });
            match focus_target {
                Some(node) => {
                    self.focus(node);
                }
                None => self.blur(),
            }
        }
        outcome
    }

    /// Activate `target` (`click`).
    ///
    /// Disabled form controls, and anything inside a disabled button,
    /// swallow the click without running handlers.
    pub fn click(&self, target: NodeId) -> DispatchOutcome {
        let suppressed = self.read(|tree| {
            let mut cursor = Some(target);
            while let Some(node) = cursor {
                let Some(data) = tree.get(node) else {
                    return true;
                };
                if data.element.is_disabled() {
                    return true;
                }
                cursor = data.parent;
            }
            false
        });
        if suppressed {
            tracing::trace!(%target, "click suppressed");
            return DispatchOutcome::default();
        }
        self.bubble(target, PointerKind::Click)
    }

    fn bubble(&self, target: NodeId, kind: PointerKind) -> DispatchOutcome {
        let path: Vec<NodeId> = self.read(|tree| {
            let mut path = Vec::new();
            let mut cursor = Some(target);
            while let Some(node) = cursor {
                let Some(data) = tree.get(node) else {
                    break;
                };
                path.push(node);
                cursor = data.parent;
            }
            path
        });

        let mut event = PointerEvent {
            mouse: kind.mouse(),
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
        };
        let mut handled = 0;
        for node in path {
            let handlers: Vec<PointerHandler> = self.read(|tree| {
                tree.get(node)
                    .map(|data| kind.handlers(&data.handlers).to_vec())
                    .unwrap_or_default()
            });
            event.current_target = node;
            for handler in handlers {
                handler(self, &mut event);
                handled += 1;
            }
            if event.propagation_stopped {
                break;
            }
        }

        DispatchOutcome {
            handled,
            default_prevented: event.default_prevented,
        }
    }
}
