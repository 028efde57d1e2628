#![forbid(unsafe_code)]

//! Core input types and logging setup for Folio.
//!
//! The event types here are host-agnostic: a document dispatcher or a test
//! driver constructs them and widgets pattern-match on them.

pub mod event;
pub mod logging;

pub use event::{
    KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    TabDirection,
};
