#![forbid(unsafe_code)]

//! Accessible modal dialog.
//!
//! # Lifecycle
//!
//! The host owns the `open` flag and a [`ModalState`]; it rebuilds the
//! [`Modal`] props and calls `render` whenever either changes.
//!
//! - **closed → open**: remember the focused element, lock body scroll,
//!   mount overlay + dialog under the host node, install one window key
//!   listener, and queue initial focus for the next tick.
//! - **open → open**: the title text is refreshed; mounted content is left
//!   untouched.
//! - **open → closed** (or the state is dropped/unmounted): a single
//!   teardown removes the nodes and the listener, cancels pending initial
//!   focus, restores scroll, and returns focus to the remembered element if
//!   it can still take focus.
//!
//! # Focus Management
//!
//! - **Auto-focus**: first focusable element of the content region, else
//!   the dialog container (tab index `-1`).
//! - **Focus trap**: Tab / Shift+Tab cycle through the content region's
//!   focusable set and wrap at either end.
//! - **Focus restore**: on every close path.
//! - **Escape to close**: invokes the close callback.
//!
//! # Example
//!
//! ```ignore
//! let open = Rc::new(Cell::new(false));
//! let mut state = ModalState::new();
//!
//! let flag = Rc::clone(&open);
//! Modal::new("Example Modal", move || flag.set(false))
//!     .open(open.get())
//!     .content(|doc: &Document, body: NodeId| -> folio_dom::Result<()> {
//!         doc.append(body, Element::paragraph("Focus enters on open."))?;
//!         Ok(())
//!     })
//!     .render(&doc, host, &mut state)?;
//! ```

mod config;
mod dialog;
pub mod focus_trap;
mod session;

pub use config::ModalConfig;
pub use dialog::{CloseReason, Modal, ModalState, OnClose};
pub use focus_trap::{FocusTrap, TrapOutcome, focusable_elements};
