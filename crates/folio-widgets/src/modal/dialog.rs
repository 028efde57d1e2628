#![forbid(unsafe_code)]

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use folio_core::KeyEvent;
use folio_dom::{Document, DomError, Element, NodeId, Result, Role};

use super::config::ModalConfig;
use super::focus_trap::{FocusTrap, TrapOutcome};
use super::session::{ModalNodes, OpenSession};
use crate::button::{Button, ButtonVariant};
use crate::{Content, StatefulWidget, Widget};

/// Close request callback. The host flips its `open` flag in response.
pub type OnClose = Rc<dyn Fn()>;

/// Why a close was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    Escape,
    Backdrop,
    CloseButton,
}

impl CloseReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Escape => "escape",
            Self::Backdrop => "backdrop",
            Self::CloseButton => "close_button",
        }
    }
}

fn invoke_close(on_close: &OnClose, reason: CloseReason) {
    tracing::debug!(reason = reason.as_str(), "modal close requested");
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| on_close())) {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        tracing::error!(reason = reason.as_str(), panic = %message, "modal close callback panicked");
    }
}

/// Accessible modal dialog props.
///
/// Rebuilt by the host on every render; persistent data lives in
/// [`ModalState`].
#[derive(Clone)]
pub struct Modal {
    title: String,
    open: bool,
    on_close: OnClose,
    config: ModalConfig,
    content: Option<Rc<dyn Content>>,
}

impl Modal {
    /// A closed modal titled `title`.
    pub fn new(title: impl Into<String>, on_close: impl Fn() + 'static) -> Self {
        Self::with_callback(title, Rc::new(on_close))
    }

    /// Like [`Modal::new`], sharing an existing callback.
    pub fn with_callback(title: impl Into<String>, on_close: OnClose) -> Self {
        Self {
            title: title.into(),
            open: false,
            on_close,
            config: ModalConfig::default(),
            content: None,
        }
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Body content, built into the content region each time the modal opens.
    pub fn content(mut self, content: impl Content + 'static) -> Self {
        self.content = Some(Rc::new(content));
        self
    }

    pub fn config(mut self, config: ModalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn mount(&self, doc: &Document, parent: NodeId, title_id: String) -> Result<OpenSession> {
        if !doc.exists(parent) {
            return Err(DomError::UnknownNode(parent));
        }
        let return_focus = doc.active_element();
        let scroll = self.config.lock_scroll.then(|| doc.lock_scroll());

        let overlay = doc.create_element(
            Element::div()
                .class("modal-overlay")
                .role(Role::Presentation),
        );
        let nodes = match self
            .build(doc, overlay, title_id)
            .and_then(|nodes| doc.append_child(parent, overlay).map(|()| nodes))
        {
            Ok(nodes) => nodes,
            Err(err) => {
                if let Err(remove_err) = doc.remove(overlay) {
                    tracing::debug!(%remove_err, "partial modal overlay already gone");
                }
                tracing::debug!(%err, "modal mount failed");
                return Err(err);
            }
        };

        let trap = FocusTrap::new(nodes.dialog, nodes.body);
        let focus_task = doc.set_timeout(move |doc| {
            let focused = trap.focus_initial(doc);
            tracing::trace!(?focused, "initial modal focus");
        });

        let on_close = Rc::clone(&self.on_close);
        let close_on_escape = self.config.close_on_escape;
        let keys = doc.add_key_listener(move |doc, event| {
            let key: KeyEvent = *event.key();
            if !key.is_press() {
                return;
            }
            if key.is_escape() {
                if close_on_escape {
                    event.prevent_default();
                    invoke_close(&on_close, CloseReason::Escape);
                }
                return;
            }
            if let Some(direction) = key.tab_direction() {
                if !trap.owns_focus(doc) {
                    tracing::trace!("tab left to the modal holding focus");
                    return;
                }
                event.prevent_default();
                let outcome: TrapOutcome = trap.handle_tab(doc, direction);
                tracing::trace!(?outcome, "focus trap");
            }
        });

        tracing::debug!(title = %self.title, overlay = %nodes.overlay, "modal opened");
        Ok(
            OpenSession::new(doc, nodes, return_focus, self.config.restore_focus)
                .with_scroll_lock(scroll)
                .with_keys(keys)
                .with_focus_task(focus_task),
        )
    }

    /// Build the dialog subtree under the detached `overlay`.
    fn build(&self, doc: &Document, overlay: NodeId, title_id: String) -> Result<ModalNodes> {
        if self.config.close_on_backdrop {
            let on_close = Rc::clone(&self.on_close);
            doc.on_mouse_down(overlay, move |_, event| {
                event.prevent_default();
                invoke_close(&on_close, CloseReason::Backdrop);
            })?;
        }

        let dialog = doc.append(
            overlay,
            Element::div()
                .class("modal")
                .role(Role::Dialog)
                .aria_modal(true)
                .labelledby(title_id.clone())
                .tab_index(-1),
        )?;
        doc.on_mouse_down(dialog, |_, event| event.stop_propagation())?;

        let header = doc.append(dialog, Element::div().class("modal__header"))?;
        let title = doc.append(
            header,
            Element::div()
                .class("modal__title")
                .id(title_id)
                .text(self.title.clone()),
        )?;
        let close_button = if self.config.show_close_button {
            let on_close = Rc::clone(&self.on_close);
            let button = Button::new("Close")
                .variant(ButtonVariant::Ghost)
                .aria_label(self.config.close_label.clone())
                .on_click(move || invoke_close(&on_close, CloseReason::CloseButton))
                .mount(doc, header)?;
            Some(button)
        } else {
            None
        };

        let body = doc.append(dialog, Element::div().class("modal__body"))?;
        if let Some(content) = &self.content {
            content.build(doc, body)?;
        }

        Ok(ModalNodes {
            overlay,
            dialog,
            title,
            close_button,
            body,
        })
    }
}

impl fmt::Debug for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modal")
            .field("title", &self.title)
            .field("open", &self.open)
            .field("config", &self.config)
            .field("has_content", &self.content.is_some())
            .finish()
    }
}

/// Per-instance modal state, owned by the host across renders.
///
/// Dropping the state while open tears the modal down like a close.
#[derive(Debug, Default)]
pub struct ModalState {
    title_id: Option<String>,
    session: Option<OpenSession>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the modal is currently mounted.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn overlay(&self) -> Option<NodeId> {
        self.nodes().map(|n| n.overlay)
    }

    /// The `role="dialog"` container.
    pub fn dialog(&self) -> Option<NodeId> {
        self.nodes().map(|n| n.dialog)
    }

    /// The content region the focus trap cycles through.
    pub fn content(&self) -> Option<NodeId> {
        self.nodes().map(|n| n.body)
    }

    pub fn title(&self) -> Option<NodeId> {
        self.nodes().map(|n| n.title)
    }

    pub fn close_button(&self) -> Option<NodeId> {
        self.nodes().and_then(|n| n.close_button)
    }

    /// Id referenced by the dialog's `aria-labelledby`. Stable for the life
    /// of the state once assigned.
    pub fn title_id(&self) -> Option<&str> {
        self.title_id.as_deref()
    }

    /// Element focused before the modal opened.
    pub fn return_focus(&self) -> Option<NodeId> {
        self.session.as_ref().and_then(OpenSession::return_focus)
    }

    /// Tear down an open modal immediately.
    pub fn unmount(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            tracing::debug!("modal closed");
        }
    }

    fn nodes(&self) -> Option<&ModalNodes> {
        self.session.as_ref().map(OpenSession::nodes)
    }
}

impl StatefulWidget for Modal {
    type State = ModalState;

    fn render(&self, doc: &Document, parent: NodeId, state: &mut ModalState) -> Result<Option<NodeId>> {
        if !self.open {
            state.unmount();
            return Ok(None);
        }

        if let Some(session) = &state.session
            && session.is_live_in(doc)
        {
            let nodes = *session.nodes();
            doc.set_text(nodes.title, self.title.clone())?;
            return Ok(Some(nodes.overlay));
        }

        // Stale session: mounted in another document or removed externally.
        state.unmount();

        let title_id = state
            .title_id
            .get_or_insert_with(|| doc.unique_id("modal-title"))
            .clone();
        let session = self.mount(doc, parent, title_id)?;
        let overlay = session.nodes().overlay;
        state.session = Some(session);
        Ok(Some(overlay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{KeyCode, Modifiers};
    use folio_dom::Overflow;
    use std::cell::Cell;

    struct Host {
        doc: Document,
        root: NodeId,
        trigger: NodeId,
        closes: Rc<Cell<u32>>,
    }

    impl Host {
        fn new() -> Self {
            let doc = Document::new();
            let root = doc.append(doc.body(), Element::div().id("root")).unwrap();
            let trigger = doc.append(root, Element::button("Open modal")).unwrap();
            Self {
                doc,
                root,
                trigger,
                closes: Rc::new(Cell::new(0)),
            }
        }

        fn modal(&self, open: bool) -> Modal {
            let closes = Rc::clone(&self.closes);
            Modal::new("Example Modal", move || closes.set(closes.get() + 1)).open(open)
        }

        fn render(&self, modal: &Modal, state: &mut ModalState) -> Option<NodeId> {
            modal.render(&self.doc, self.root, state).unwrap()
        }
    }

    fn inputs(count: usize) -> impl Fn(&Document, NodeId) -> Result<()> {
        move |doc: &Document, parent: NodeId| -> Result<()> {
            for i in 0..count {
                doc.append(parent, Element::input().id(format!("field-{i}")))?;
            }
            Ok(())
        }
    }

    #[test]
    fn closed_modal_renders_nothing() {
        let host = Host::new();
        let mut state = ModalState::new();
        let before = host.doc.node_count();
        assert_eq!(host.render(&host.modal(false), &mut state), None);
        assert_eq!(host.doc.node_count(), before);
        assert_eq!(host.doc.key_listener_count(), 0);
        assert_eq!(host.doc.pending_tasks(), 0);
        assert!(!state.is_open());
    }

    #[test]
    fn open_builds_labelled_dialog() {
        let host = Host::new();
        let mut state = ModalState::new();
        let overlay = host.render(&host.modal(true), &mut state).unwrap();

        assert_eq!(host.doc.parent(overlay), Some(host.root));
        let dialog = state.dialog().unwrap();
        let el = host.doc.element(dialog).unwrap();
        assert_eq!(el.aria.role, Some(Role::Dialog));
        assert!(el.aria.modal);
        assert_eq!(el.tab_index, Some(-1));
        assert_eq!(el.aria.labelledby.as_deref(), state.title_id());
        assert_eq!(
            host.doc.accessible_name(dialog).as_deref(),
            Some("Example Modal")
        );

        let close = state.close_button().unwrap();
        assert_eq!(
            host.doc.accessible_name(close).as_deref(),
            Some("Close dialog")
        );
        assert!(host.doc.with_element(close, |el| el.has_class("btn--ghost")).unwrap());
        assert_eq!(host.doc.key_listener_count(), 1);
        assert_eq!(host.doc.body_overflow(), Overflow::Hidden);
    }

    #[test]
    fn initial_focus_waits_one_tick() {
        let host = Host::new();
        host.doc.focus(host.trigger);
        let mut state = ModalState::new();
        host.render(&host.modal(true).content(inputs(2)), &mut state);

        assert_eq!(host.doc.active_element(), Some(host.trigger));
        assert_eq!(state.return_focus(), Some(host.trigger));
        host.doc.run_pending();
        assert_eq!(host.doc.element_by_id("field-0"), host.doc.active_element());
    }

    #[test]
    fn empty_content_focuses_container() {
        let host = Host::new();
        let mut state = ModalState::new();
        host.render(&host.modal(true), &mut state);
        host.doc.run_pending();
        assert_eq!(host.doc.active_element(), state.dialog());

        host.doc.dispatch_key(KeyEvent::new(KeyCode::Tab));
        assert_eq!(host.doc.active_element(), state.dialog());
    }

    #[test]
    fn tab_from_close_button_enters_content() {
        let host = Host::new();
        let mut state = ModalState::new();
        host.render(&host.modal(true).content(inputs(2)), &mut state);
        host.doc.run_pending();

        host.doc.focus(state.close_button().unwrap());
        host.doc.dispatch_key(KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT));
        assert_eq!(host.doc.element_by_id("field-1"), host.doc.active_element());
    }

    #[test]
    fn escape_requests_close_without_closing() {
        let host = Host::new();
        let mut state = ModalState::new();
        host.render(&host.modal(true), &mut state);

        let outcome = host.doc.dispatch_key(KeyEvent::new(KeyCode::Escape));
        assert!(outcome.default_prevented);
        assert_eq!(host.closes.get(), 1);
        assert!(state.is_open());

        let release = KeyEvent::new(KeyCode::Escape).with_kind(folio_core::KeyEventKind::Release);
        host.doc.dispatch_key(release);
        assert_eq!(host.closes.get(), 1);
    }

    #[test]
    fn escape_can_be_disabled() {
        let host = Host::new();
        let mut state = ModalState::new();
        let modal = host
            .modal(true)
            .config(ModalConfig::default().close_on_escape(false));
        host.render(&modal, &mut state);
        host.doc.dispatch_key(KeyEvent::new(KeyCode::Escape));
        assert_eq!(host.closes.get(), 0);
    }

    #[test]
    fn backdrop_closes_dialog_does_not() {
        let host = Host::new();
        let mut state = ModalState::new();
        host.render(&host.modal(true).content(inputs(1)), &mut state);

        host.doc.mouse_down(state.content().unwrap());
        assert_eq!(host.closes.get(), 0);
        host.doc.mouse_down(state.overlay().unwrap());
        assert_eq!(host.closes.get(), 1);
    }

    #[test]
    fn close_button_requests_close() {
        let host = Host::new();
        let mut state = ModalState::new();
        host.render(&host.modal(true), &mut state);
        host.doc.click(state.close_button().unwrap());
        assert_eq!(host.closes.get(), 1);
    }

    #[test]
    fn optional_chrome_can_be_turned_off() {
        let host = Host::new();
        let mut state = ModalState::new();
        let config = ModalConfig::default()
            .show_close_button(false)
            .close_on_backdrop(false)
            .lock_scroll(false);
        host.render(&host.modal(true).config(config), &mut state);

        assert_eq!(state.close_button(), None);
        assert_eq!(host.doc.body_overflow(), Overflow::Visible);
        host.doc.mouse_down(state.overlay().unwrap());
        assert_eq!(host.closes.get(), 0);
    }

    #[test]
    fn close_restores_scroll_and_focus() {
        let host = Host::new();
        host.doc.set_body_overflow(Overflow::Scroll);
        host.doc.focus(host.trigger);
        let mut state = ModalState::new();
        let overlay = host.render(&host.modal(true).content(inputs(1)), &mut state).unwrap();
        host.doc.run_pending();

        assert_eq!(host.render(&host.modal(false), &mut state), None);
        assert!(!host.doc.exists(overlay));
        assert_eq!(host.doc.body_overflow(), Overflow::Scroll);
        assert_eq!(host.doc.active_element(), Some(host.trigger));
        assert_eq!(host.doc.key_listener_count(), 0);
    }

    #[test]
    fn close_before_tick_cancels_initial_focus() {
        let host = Host::new();
        let mut state = ModalState::new();
        host.render(&host.modal(true).content(inputs(1)), &mut state);
        host.render(&host.modal(false), &mut state);
        assert_eq!(host.doc.pending_tasks(), 0);
        assert_eq!(host.doc.run_pending(), 0);
    }

    #[test]
    fn rerender_while_open_refreshes_title_only() {
        let host = Host::new();
        let mut state = ModalState::new();
        let first = host.render(&host.modal(true).content(inputs(1)), &mut state);
        let field = host.doc.element_by_id("field-0");

        let renamed = Modal::new("Renamed", || {}).open(true).content(inputs(3));
        let second = host.render(&renamed, &mut state);
        assert_eq!(first, second);
        assert_eq!(host.doc.element_by_id("field-0"), field);
        assert_eq!(host.doc.element_by_id("field-2"), None);
        assert_eq!(
            host.doc.accessible_name(state.dialog().unwrap()).as_deref(),
            Some("Renamed")
        );
        assert_eq!(host.doc.key_listener_count(), 1);
    }

    #[test]
    fn title_id_is_stable_across_reopen() {
        let host = Host::new();
        let mut state = ModalState::new();
        host.render(&host.modal(true), &mut state);
        let id = state.title_id().map(str::to_owned);
        host.render(&host.modal(false), &mut state);
        host.render(&host.modal(true), &mut state);
        assert_eq!(state.title_id().map(str::to_owned), id);
    }

    #[test]
    fn dropping_open_state_tears_down() {
        let host = Host::new();
        let mut state = ModalState::new();
        let overlay = host.render(&host.modal(true), &mut state).unwrap();
        drop(state);
        assert!(!host.doc.exists(overlay));
        assert_eq!(host.doc.key_listener_count(), 0);
        assert_eq!(host.doc.body_overflow(), Overflow::Visible);
    }

    #[test]
    fn panicking_callback_is_contained() {
        folio_core::logging::init_for_tests();
        let host = Host::new();
        let mut state = ModalState::new();
        let modal = Modal::new("Boom", || panic!("host bug")).open(true);
        host.render(&modal, &mut state);
        let outcome = host.doc.dispatch_key(KeyEvent::new(KeyCode::Escape));
        assert!(outcome.default_prevented);
        assert!(state.is_open());
    }

    #[test]
    fn failed_content_leaves_no_trace() {
        let host = Host::new();
        host.doc.set_body_overflow(Overflow::Auto);
        let mut state = ModalState::new();
        let before = host.doc.node_count();
        let stale = host.doc.create_element(Element::div());
        host.doc.remove(stale).unwrap();

        let modal = host
            .modal(true)
            .content(move |doc: &Document, _: NodeId| -> Result<()> {
                doc.append(stale, Element::input())?;
                Ok(())
            });
        let err = modal.render(&host.doc, host.root, &mut state).unwrap_err();
        assert_eq!(err, DomError::UnknownNode(stale));
        assert_eq!(host.doc.node_count(), before);
        assert_eq!(host.doc.body_overflow(), Overflow::Auto);
        assert_eq!(host.doc.key_listener_count(), 0);
        assert!(!state.is_open());
    }

    #[test]
    fn content_removing_its_overlay_fails_cleanly() {
        let host = Host::new();
        let mut state = ModalState::new();
        let before = host.doc.node_count();
        let overlay_slot = Rc::new(Cell::new(None));
        let seen = Rc::clone(&overlay_slot);

        let modal = host
            .modal(true)
            .content(move |doc: &Document, body: NodeId| -> Result<()> {
                let overlay = doc
                    .parent(body)
                    .and_then(|dialog| doc.parent(dialog))
                    .ok_or(DomError::UnknownNode(body))?;
                seen.set(Some(overlay));
                doc.remove(overlay)
            });
        let err = modal.render(&host.doc, host.root, &mut state).unwrap_err();
        let overlay = overlay_slot.get().unwrap();
        assert_eq!(err, DomError::UnknownNode(overlay));
        assert!(!host.doc.exists(overlay));
        assert_eq!(host.doc.node_count(), before);
        assert_eq!(host.doc.key_listener_count(), 0);
        assert_eq!(host.doc.body_overflow(), Overflow::Visible);
        assert!(!state.is_open());
    }

    #[test]
    fn moving_to_another_document_remounts() {
        let host = Host::new();
        let mut state = ModalState::new();
        let old = host.render(&host.modal(true), &mut state).unwrap();

        let other = Document::new();
        let overlay = host
            .modal(true)
            .render(&other, other.body(), &mut state)
            .unwrap()
            .unwrap();
        assert!(!host.doc.exists(old));
        assert_eq!(host.doc.key_listener_count(), 0);
        assert!(other.is_connected(overlay));
        assert_eq!(other.key_listener_count(), 1);
    }
}
