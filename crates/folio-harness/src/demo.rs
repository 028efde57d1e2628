#![forbid(unsafe_code)]

//! "Component Library Demo" page fixture.
//!
//! Three cards: the button variants, nested cards, and a modal opened from a
//! trigger button. The page owns the modal's `open` flag and re-renders the
//! modal after every interaction, the way a host framework commits state
//! changes after an event handler returns.

use std::cell::Cell;
use std::rc::Rc;

use folio_core::KeyEvent;
use folio_dom::{DispatchOutcome, Document, Element, NodeId, Result};
use folio_widgets::{Button, ButtonVariant, Card, Modal, ModalState, StatefulWidget, Widget};

use crate::driver::Harness;

pub const PAGE_TITLE: &str = "Component Library Demo";
pub const MODAL_TITLE: &str = "Example Modal";

/// The mounted demo page plus the host state behind it.
#[derive(Debug)]
pub struct ComponentsDemo {
    harness: Harness,
    page: NodeId,
    trigger: NodeId,
    modal_host: NodeId,
    open: Rc<Cell<bool>>,
    actions: Rc<Cell<u32>>,
    state: ModalState,
}

impl ComponentsDemo {
    /// Mount the page into a fresh document.
    pub fn new() -> Result<Self> {
        Self::mount(Document::new())
    }

    /// Mount the page under `doc`'s body.
    pub fn mount(doc: Document) -> Result<Self> {
        let page = doc.append(doc.body(), Element::div().class("page"))?;
        doc.append(page, Element::div().class("page-title").text(PAGE_TITLE))?;
        doc.append(
            page,
            Element::paragraph(
                "A small UI kit: typed props, consistent styling, accessible focus, \
                 and predictable composition.",
            )
            .class("page-subtitle"),
        )?;
        let grid = doc.append(page, Element::div().class("grid grid--cards"))?;

        Card::new()
            .title("Buttons")
            .description("Primary, secondary, ghost. Disabled + focus states.")
            .body(|doc: &Document, body: NodeId| -> Result<()> {
                let row = doc.append(body, Element::div().class("demo-row"))?;
                Button::new("Primary").mount(doc, row)?;
                Button::new("Secondary")
                    .variant(ButtonVariant::Secondary)
                    .mount(doc, row)?;
                Button::new("Ghost").variant(ButtonVariant::Ghost).mount(doc, row)?;
                Button::new("Disabled").disabled(true).mount(doc, row)?;
                Ok(())
            })
            .mount(&doc, grid)?;

        Card::new()
            .title("Cards")
            .description("Reusable surfaces for content and layout.")
            .body(|doc: &Document, body: NodeId| -> Result<()> {
                let stack = doc.append(body, Element::div().class("demo-stack"))?;
                doc.append(
                    stack,
                    Element::div()
                        .class("demo-note")
                        .text("Cards are composable: header + body sections."),
                )?;
                Card::new()
                    .class("ui-card--sub")
                    .title("Nested card")
                    .description("Useful for grouped content.")
                    .body(|doc: &Document, body: NodeId| -> Result<()> {
                        doc.append(
                            body,
                            Element::div()
                                .class("demo-note")
                                .text("No extra layout glue required."),
                        )?;
                        Ok(())
                    })
                    .mount(doc, stack)?;
                Ok(())
            })
            .mount(&doc, grid)?;

        let open = Rc::new(Cell::new(false));
        let slots: Rc<Cell<Option<(NodeId, NodeId)>>> = Rc::new(Cell::new(None));
        let record = Rc::clone(&slots);
        let opener = Rc::clone(&open);
        Card::new()
            .title("Modal")
            .description("ESC closes. Click outside closes. Focus moves in and returns.")
            .body(move |doc: &Document, body: NodeId| -> Result<()> {
                let row = doc.append(body, Element::div().class("demo-row"))?;
                let flag = Rc::clone(&opener);
                let trigger = Button::new("Open modal")
                    .on_click(move || flag.set(true))
                    .mount(doc, row)?;
                record.set(Some((trigger, body)));
                Ok(())
            })
            .mount(&doc, grid)?;
        let Some((trigger, modal_host)) = slots.get() else {
            return Err(folio_dom::DomError::UnknownNode(grid));
        };

        tracing::debug!(%page, "components demo mounted");
        Ok(Self {
            harness: Harness::with_document(doc),
            page,
            trigger,
            modal_host,
            open,
            actions: Rc::new(Cell::new(0)),
            state: ModalState::new(),
        })
    }

    pub fn harness(&self) -> &Harness {
        &self.harness
    }

    pub fn doc(&self) -> &Document {
        self.harness.doc()
    }

    pub fn page(&self) -> NodeId {
        self.page
    }

    /// The "Open modal" button.
    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    /// Node the modal mounts under (the Modal card's body).
    pub fn modal_host(&self) -> NodeId {
        self.modal_host
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Set the host's open flag directly, then re-render.
    pub fn set_open(&mut self, open: bool) -> Result<()> {
        self.open.set(open);
        self.rerender()
    }

    pub fn modal_state(&self) -> &ModalState {
        &self.state
    }

    /// Number of "Primary action" activations inside the modal.
    pub fn action_count(&self) -> u32 {
        self.actions.get()
    }

    fn modal(&self) -> Modal {
        let open = Rc::clone(&self.open);
        let close = Rc::clone(&self.open);
        let actions = Rc::clone(&self.actions);
        Modal::new(MODAL_TITLE, move || open.set(false))
            .open(self.open.get())
            .content(move |doc: &Document, body: NodeId| -> Result<()> {
                doc.append(
                    body,
                    Element::paragraph(
                        "This modal demonstrates basic accessibility behavior: focus \
                         enters on open, ESC closes, and focus returns to the opener on \
                         close.",
                    ),
                )?;
                let row = doc.append(body, Element::div().class("demo-row"))?;
                let actions = Rc::clone(&actions);
                Button::new("Primary action")
                    .on_click(move || actions.set(actions.get() + 1))
                    .mount(doc, row)?;
                let close = Rc::clone(&close);
                Button::new("Cancel")
                    .variant(ButtonVariant::Ghost)
                    .on_click(move || close.set(false))
                    .mount(doc, row)?;
                Ok(())
            })
    }

    /// Commit the current open flag to the modal.
    pub fn rerender(&mut self) -> Result<()> {
        let modal = self.modal();
        modal.render(self.harness.doc(), self.modal_host, &mut self.state)?;
        Ok(())
    }

    /// Click `target`, then commit.
    pub fn click(&mut self, target: NodeId) -> Result<DispatchOutcome> {
        let outcome = self.harness.click(target);
        self.rerender()?;
        Ok(outcome)
    }

    /// Mousedown only (e.g. on the backdrop), then commit.
    pub fn mouse_down(&mut self, target: NodeId) -> Result<DispatchOutcome> {
        let outcome = self.harness.mouse_down(target);
        self.rerender()?;
        Ok(outcome)
    }

    /// Key press, then commit.
    pub fn press(&mut self, key: KeyEvent) -> Result<DispatchOutcome> {
        let outcome = self.harness.press(key);
        self.rerender()?;
        Ok(outcome)
    }

    pub fn escape(&mut self) -> Result<DispatchOutcome> {
        let outcome = self.harness.escape();
        self.rerender()?;
        Ok(outcome)
    }

    pub fn tab(&mut self) -> Result<DispatchOutcome> {
        let outcome = self.harness.tab();
        self.rerender()?;
        Ok(outcome)
    }

    pub fn shift_tab(&mut self) -> Result<DispatchOutcome> {
        let outcome = self.harness.shift_tab();
        self.rerender()?;
        Ok(outcome)
    }

    /// Run one tick of queued tasks (initial modal focus).
    pub fn tick(&self) -> usize {
        self.harness.tick()
    }

    /// Open through the trigger and settle initial focus.
    pub fn open_via_trigger(&mut self) -> Result<()> {
        self.click(self.trigger)?;
        self.tick();
        Ok(())
    }
}
