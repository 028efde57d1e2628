#![forbid(unsafe_code)]

//! UI kit widgets for Folio.
//!
//! Widgets mount element subtrees into a [`Document`]. Stateless widgets
//! ([`Button`], [`Card`]) implement [`Widget`]; the modal dialog keeps an
//! explicit state record between renders and implements [`StatefulWidget`].

pub mod button;
pub mod card;
pub mod modal;

pub use button::{Button, ButtonVariant};
pub use card::Card;
pub use modal::{CloseReason, Modal, ModalConfig, ModalState};

use folio_dom::{Document, NodeId, Result};

/// A `Widget` mounts a fresh subtree under `parent` and returns its root.
pub trait Widget {
    fn mount(&self, doc: &Document, parent: NodeId) -> Result<NodeId>;
}

/// A `StatefulWidget` renders against state that persists across renders.
///
/// Returns the widget's root node, or `None` when it renders nothing.
pub trait StatefulWidget {
    type State;

    fn render(&self, doc: &Document, parent: NodeId, state: &mut Self::State)
    -> Result<Option<NodeId>>;
}

/// Projected child content: builds nodes under the given parent.
///
/// Implemented for closures, so content is usually written inline:
///
/// ```ignore
/// let body = |doc: &Document, parent: NodeId| -> folio_dom::Result<()> {
///     doc.append(parent, Element::paragraph("Hello"))?;
///     Ok(())
/// };
/// ```
pub trait Content {
    fn build(&self, doc: &Document, parent: NodeId) -> Result<()>;
}

impl<F> Content for F
where
    F: Fn(&Document, NodeId) -> Result<()>,
{
    fn build(&self, doc: &Document, parent: NodeId) -> Result<()> {
        self(doc, parent)
    }
}

/// Join a base class list with optional extra classes, trimming the result.
pub(crate) fn class_list(base: &str, extra: &str) -> String {
    format!("{base} {extra}").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::Element;

    #[test]
    fn class_list_trims_empty_extra() {
        assert_eq!(class_list("btn btn--primary", ""), "btn btn--primary");
        assert_eq!(class_list("ui-card", "ui-card--sub"), "ui-card ui-card--sub");
    }

    #[test]
    fn closures_are_content() {
        let doc = Document::new();
        let content = |doc: &Document, parent: NodeId| -> Result<()> {
            doc.append(parent, Element::paragraph("projected"))?;
            Ok(())
        };
        content.build(&doc, doc.body()).unwrap();
        assert_eq!(doc.children(doc.body()).len(), 1);
    }
}
