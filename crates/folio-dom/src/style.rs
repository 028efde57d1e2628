#![forbid(unsafe_code)]

//! Body scroll style and the scroll lock guard.

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

use crate::document::{Document, Tree};

/// Inline `overflow` style of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Auto,
    Scroll,
}

impl Overflow {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Auto => "auto",
            Self::Scroll => "scroll",
        }
    }

    /// Whether the page can scroll under this value.
    pub const fn allows_scroll(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Suspends page scrolling while alive.
///
/// Acquiring records the current body overflow and sets
/// [`Overflow::Hidden`]; releasing writes the recorded value back verbatim.
/// Nested locks released in reverse order restore the original value.
#[must_use = "dropping a ScrollLock immediately restores scrolling"]
pub struct ScrollLock {
    doc: Weak<RefCell<Tree>>,
    previous: Overflow,
    active: bool,
}

impl ScrollLock {
    /// The overflow value that will be restored.
    pub fn previous(&self) -> Overflow {
        self.previous
    }

    /// Restore now.
    pub fn release(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if !std::mem::replace(&mut self.active, false) {
            return;
        }
        if let Some(doc) = Document::upgrade(&self.doc) {
            doc.set_body_overflow(self.previous);
            tracing::trace!(restored = self.previous.as_str(), "scroll lock released");
        }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.restore();
    }
}

impl fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLock")
            .field("previous", &self.previous)
            .field("active", &self.active)
            .finish()
    }
}

impl Document {
    pub fn body_overflow(&self) -> Overflow {
        self.read(|tree| tree.overflow)
    }

    pub fn set_body_overflow(&self, overflow: Overflow) {
        self.write(|tree| tree.overflow = overflow);
    }

    /// Suspend page scrolling until the returned guard is released.
    pub fn lock_scroll(&self) -> ScrollLock {
        let previous = self.write(|tree| std::mem::replace(&mut tree.overflow, Overflow::Hidden));
        tracing::trace!(previous = previous.as_str(), "scroll locked");
        ScrollLock {
            doc: self.downgrade(),
            previous,
            active: true,
        }
    }
}
