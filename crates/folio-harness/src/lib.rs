#![forbid(unsafe_code)]

//! Test harness and reference fixtures for Folio.
//!
//! - [`outline`]: deterministic text rendering of a document, plus the
//!   [`assert_outline!`] macro.
//! - [`driver::Harness`]: user-level input (keys, clicks, ticks).
//! - [`demo::ComponentsDemo`]: the component showcase page, used by the
//!   scenario tests under `tests/`.

pub mod demo;
pub mod driver;
pub mod outline;

pub use demo::ComponentsDemo;
pub use driver::Harness;
pub use outline::{describe, outline, outline_of};

#[doc(hidden)]
pub use pretty_assertions;
