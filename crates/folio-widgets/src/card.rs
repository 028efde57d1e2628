#![forbid(unsafe_code)]

//! Card surface with optional header and body.

use std::fmt;
use std::rc::Rc;

use folio_dom::{Document, Element, NodeId, Result};

use crate::{Content, Widget, class_list};

/// A content card.
///
/// Structure: `div.ui-card` > (`div.ui-card__header` > `__title`?, `__desc`?)?,
/// `div.ui-card__body`?. The header exists only when a title or description
/// is set; the body only when content is supplied.
#[derive(Clone, Default)]
pub struct Card {
    title: Option<String>,
    description: Option<String>,
    class: String,
    body: Option<Rc<dyn Content>>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn body(mut self, content: impl Content + 'static) -> Self {
        self.body = Some(Rc::new(content));
        self
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("class", &self.class)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

impl Widget for Card {
    fn mount(&self, doc: &Document, parent: NodeId) -> Result<NodeId> {
        let card = doc.append(parent, Element::div().class(class_list("ui-card", &self.class)))?;

        if self.title.is_some() || self.description.is_some() {
            let header = doc.append(card, Element::div().class("ui-card__header"))?;
            if let Some(title) = &self.title {
                doc.append(header, Element::div().class("ui-card__title").text(title.clone()))?;
            }
            if let Some(description) = &self.description {
                doc.append(
                    header,
                    Element::div().class("ui-card__desc").text(description.clone()),
                )?;
            }
        }

        if let Some(content) = &self.body {
            let body = doc.append(card, Element::div().class("ui-card__body"))?;
            content.build(doc, body)?;
        }

        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(doc: &Document, nodes: &[NodeId]) -> Vec<String> {
        nodes
            .iter()
            .filter_map(|&n| doc.with_element(n, |el| el.class.clone()))
            .collect()
    }

    #[test]
    fn bare_card_has_no_sections() {
        let doc = Document::new();
        let card = Card::new().mount(&doc, doc.body()).unwrap();
        assert!(doc.children(card).is_empty());
        assert_eq!(classes(&doc, &[card]), vec!["ui-card"]);
    }

    #[test]
    fn header_holds_only_present_parts() {
        let doc = Document::new();
        let card = Card::new()
            .description("Reusable surfaces")
            .mount(&doc, doc.body())
            .unwrap();
        let header = doc.children(card);
        assert_eq!(classes(&doc, &header), vec!["ui-card__header"]);
        let parts = doc.children(header[0]);
        assert_eq!(classes(&doc, &parts), vec!["ui-card__desc"]);
    }

    #[test]
    fn body_projects_content() {
        let doc = Document::new();
        let card = Card::new()
            .title("Buttons")
            .class("ui-card--sub")
            .body(|doc: &Document, parent: NodeId| -> Result<()> {
                doc.append(parent, Element::paragraph("inside"))?;
                Ok(())
            })
            .mount(&doc, doc.body())
            .unwrap();

        let sections = doc.children(card);
        assert_eq!(
            classes(&doc, &sections),
            vec!["ui-card__header", "ui-card__body"]
        );
        assert_eq!(doc.text_content(sections[1]).as_deref(), Some("inside"));
        assert_eq!(classes(&doc, &[card]), vec!["ui-card ui-card--sub"]);
    }
}
