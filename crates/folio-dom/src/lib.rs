#![forbid(unsafe_code)]

//! Host document for Folio widgets.
//!
//! A [`Document`] is a cheap-to-clone handle to a single-threaded element
//! tree. It owns the pieces of global UI state widgets need to coordinate
//! through: the active (focused) element, the body scroll style, the
//! window-level key listeners, element mouse handlers, and a one-tick task
//! queue.
//!
//! # Invariants
//!
//! 1. No interior borrow is held while a handler or task runs, so callbacks
//!    may freely re-enter the document.
//! 2. A [`NodeId`] for a removed node is stale forever; lookups through it
//!    return absent values (slot reuse bumps the generation).
//! 3. The active element, when set, is always a connected focusable node.
//!    Removing a subtree containing it resets focus to the body.
//! 4. [`KeySubscription`] and [`ScrollLock`] release exactly once, on
//!    explicit release or drop, whichever comes first.

pub mod a11y;
pub mod document;
pub mod element;
pub mod error;
pub mod events;
pub mod focus;
pub mod style;
pub mod timers;

pub use a11y::{Aria, Role};
pub use document::{Document, NodeId, WeakDocument};
pub use element::{Element, Tag};
pub use error::{DomError, Result};
pub use events::{
    DispatchOutcome, KeyHandler, KeySubscription, KeyboardEvent, ListenerId, PointerEvent,
    PointerHandler,
};
pub use style::{Overflow, ScrollLock};
pub use timers::TimerId;
