#![forbid(unsafe_code)]

//! Element tags and attributes.

use crate::a11y::{Aria, Role};

/// Element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Body,
    Div,
    Span,
    P,
    Button,
    Input,
    Textarea,
    Select,
    A,
}

impl Tag {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Div => "div",
            Self::Span => "span",
            Self::P => "p",
            Self::Button => "button",
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::A => "a",
        }
    }

    /// Tags that take part in the `disabled` attribute.
    pub const fn is_form_control(self) -> bool {
        matches!(
            self,
            Self::Button | Self::Input | Self::Textarea | Self::Select
        )
    }
}

/// An element's attributes.
///
/// Builder methods consume and return `self`, so elements are usually
/// written inline: `Element::div().class("modal").role(Role::Dialog)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub id: Option<String>,
    /// Space-separated class list.
    pub class: String,
    pub text: Option<String>,
    pub href: Option<String>,
    /// Explicit tab index. `Some(-1)` is focusable by script only.
    pub tab_index: Option<i32>,
    pub disabled: bool,
    pub aria: Aria,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            class: String::new(),
            text: None,
            href: None,
            tab_index: None,
            disabled: false,
            aria: Aria::default(),
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn span() -> Self {
        Self::new(Tag::Span)
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(Tag::P).text(text)
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::new(Tag::Button).text(label)
    }

    pub fn input() -> Self {
        Self::new(Tag::Input)
    }

    pub fn textarea() -> Self {
        Self::new(Tag::Textarea)
    }

    pub fn select() -> Self {
        Self::new(Tag::Select)
    }

    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Tag::A).href(href).text(text)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.aria.role = Some(role);
        self
    }

    pub fn aria_modal(mut self, modal: bool) -> Self {
        self.aria.modal = modal;
        self
    }

    pub fn labelledby(mut self, ids: impl Into<String>) -> Self {
        self.aria.labelledby = Some(ids.into());
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria.label = Some(label.into());
        self
    }

    pub fn aria_hidden(mut self, hidden: bool) -> Self {
        self.aria.hidden = hidden;
        self
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }

    /// Disabled state as seen by focus and click handling.
    ///
    /// Only form controls honor `disabled`, matching the HTML rule.
    pub fn is_disabled(&self) -> bool {
        self.disabled && self.tag.is_form_control()
    }

    /// Focusable without an explicit tab index.
    pub fn is_natively_focusable(&self) -> bool {
        match self.tag {
            Tag::Button | Tag::Input | Tag::Textarea | Tag::Select => true,
            Tag::A => self.href.is_some(),
            Tag::Body | Tag::Div | Tag::Span | Tag::P => false,
        }
    }
}
