#![forbid(unsafe_code)]

//! Interaction driver: user-level input against a [`Document`].

use folio_core::{KeyCode, KeyEvent, Modifiers};
use folio_dom::{DispatchOutcome, Document, NodeId};

use crate::outline;

/// Drives a document the way a user would.
///
/// Every method works through the document's public event entry points, so
/// default actions (Tab navigation, focus on mousedown) apply exactly as in
/// the host.
#[derive(Debug, Clone, Default)]
pub struct Harness {
    doc: Document,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive an existing document.
    pub fn with_document(doc: Document) -> Self {
        Self { doc }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn press(&self, key: KeyEvent) -> DispatchOutcome {
        tracing::trace!(?key, "harness key press");
        self.doc.dispatch_key(key)
    }

    pub fn tab(&self) -> DispatchOutcome {
        self.press(KeyEvent::new(KeyCode::Tab))
    }

    pub fn shift_tab(&self) -> DispatchOutcome {
        self.press(KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT))
    }

    pub fn escape(&self) -> DispatchOutcome {
        self.press(KeyEvent::new(KeyCode::Escape))
    }

    /// Run one tick of queued tasks.
    pub fn tick(&self) -> usize {
        self.doc.run_pending()
    }

    /// Press only; no click follows.
    pub fn mouse_down(&self, target: NodeId) -> DispatchOutcome {
        self.doc.mouse_down(target)
    }

    /// Full click: mousedown then click on the same target.
    ///
    /// The click is skipped when a mousedown handler removed the target.
    pub fn click(&self, target: NodeId) -> DispatchOutcome {
        let down = self.doc.mouse_down(target);
        if !self.doc.exists(target) {
            return down;
        }
        let up = self.doc.click(target);
        DispatchOutcome {
            handled: down.handled + up.handled,
            default_prevented: down.default_prevented || up.default_prevented,
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.doc.active_element()
    }

    /// `id` attribute of the focused element.
    pub fn focused_id(&self) -> Option<String> {
        self.focused()
            .and_then(|node| self.doc.with_element(node, |el| el.id.clone()))
            .flatten()
    }

    /// Visible text of the focused element.
    pub fn focused_text(&self) -> Option<String> {
        self.focused().and_then(|node| self.doc.text_content(node))
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.doc.element_by_id(id)
    }

    /// First connected element, in document order, whose own text is `text`.
    pub fn by_text(&self, text: &str) -> Option<NodeId> {
        self.doc
            .descendants(self.doc.body())
            .into_iter()
            .find(|&node| {
                self.doc
                    .with_element(node, |el| el.text.as_deref() == Some(text))
                    .unwrap_or(false)
            })
    }

    /// First connected element carrying `class`.
    pub fn by_class(&self, class: &str) -> Option<NodeId> {
        self.doc
            .descendants(self.doc.body())
            .into_iter()
            .find(|&node| {
                self.doc
                    .with_element(node, |el| el.has_class(class))
                    .unwrap_or(false)
            })
    }

    pub fn outline(&self) -> String {
        outline::outline(&self.doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::Element;

    #[test]
    fn click_focuses_then_activates() {
        let h = Harness::new();
        let button = h.doc().append(h.doc().body(), Element::button("Go")).unwrap();
        let clicks = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = std::rc::Rc::clone(&clicks);
        h.doc()
            .on_click(button, move |_, _| counter.set(counter.get() + 1))
            .unwrap();

        let outcome = h.click(button);
        assert_eq!(outcome.handled, 1);
        assert_eq!(clicks.get(), 1);
        assert_eq!(h.focused(), Some(button));
        assert_eq!(h.focused_text().as_deref(), Some("Go"));
    }

    #[test]
    fn lookups() {
        let h = Harness::new();
        let body = h.doc().body();
        let card = h.doc().append(body, Element::div().class("ui-card")).unwrap();
        let field = h.doc().append(card, Element::input().id("email")).unwrap();
        let label = h.doc().append(card, Element::paragraph("Email")).unwrap();

        assert_eq!(h.by_class("ui-card"), Some(card));
        assert_eq!(h.by_id("email"), Some(field));
        assert_eq!(h.by_text("Email"), Some(label));
        assert_eq!(h.by_text("missing"), None);

        h.tab();
        assert_eq!(h.focused_id().as_deref(), Some("email"));
    }
}
