#![forbid(unsafe_code)]

//! Button with visual variants.
//!
//! Mounts a `button` element with classes `btn btn--<variant>` plus any
//! extra classes. Disabled buttons are neither focusable nor clickable; the
//! document enforces both.

use std::fmt;
use std::rc::Rc;

use folio_dom::{Document, Element, NodeId, Result};

use crate::{Widget, class_list};

/// Visual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
}

impl ButtonVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Ghost => "ghost",
        }
    }
}

/// A clickable button.
#[derive(Clone)]
pub struct Button {
    label: String,
    variant: ButtonVariant,
    disabled: bool,
    class: String,
    aria_label: Option<String>,
    on_click: Option<Rc<dyn Fn()>>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::default(),
            disabled: false,
            class: String::new(),
            aria_label: None,
            on_click: None,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Extra classes appended after the variant classes.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Accessible label overriding the visible text.
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    /// Class list the mounted element will carry.
    pub fn class_name(&self) -> String {
        class_list(&format!("btn btn--{}", self.variant.as_str()), &self.class)
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("disabled", &self.disabled)
            .field("has_on_click", &self.on_click.is_some())
            .finish()
    }
}

impl Widget for Button {
    fn mount(&self, doc: &Document, parent: NodeId) -> Result<NodeId> {
        let mut element = Element::button(self.label.clone())
            .class(self.class_name())
            .disabled(self.disabled);
        if let Some(label) = &self.aria_label {
            element = element.aria_label(label.clone());
        }
        let node = doc.append(parent, element)?;
        if let Some(handler) = &self.on_click {
            let handler = Rc::clone(handler);
            doc.on_click(node, move |_, _| handler())?;
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn class_names_follow_variant() {
        assert_eq!(Button::new("a").class_name(), "btn btn--primary");
        assert_eq!(
            Button::new("a").variant(ButtonVariant::Ghost).class_name(),
            "btn btn--ghost"
        );
        assert_eq!(
            Button::new("a")
                .variant(ButtonVariant::Secondary)
                .class("wide")
                .class_name(),
            "btn btn--secondary wide"
        );
    }

    #[test]
    fn click_runs_handler() {
        let doc = Document::new();
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let node = Button::new("Go")
            .on_click(move || counter.set(counter.get() + 1))
            .mount(&doc, doc.body())
            .unwrap();

        doc.click(node);
        doc.click(node);
        assert_eq!(clicks.get(), 2);
        assert_eq!(doc.accessible_name(node).as_deref(), Some("Go"));
    }

    #[test]
    fn disabled_button_ignores_click_and_focus() {
        let doc = Document::new();
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let node = Button::new("Disabled")
            .disabled(true)
            .on_click(move || counter.set(counter.get() + 1))
            .mount(&doc, doc.body())
            .unwrap();

        doc.click(node);
        assert_eq!(clicks.get(), 0);
        assert!(!doc.focus(node));
    }

    #[test]
    fn aria_label_names_the_button() {
        let doc = Document::new();
        let node = Button::new("Close")
            .aria_label("Close dialog")
            .mount(&doc, doc.body())
            .unwrap();
        assert_eq!(doc.accessible_name(node).as_deref(), Some("Close dialog"));
    }
}
