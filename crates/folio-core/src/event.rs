#![forbid(unsafe_code)]

//! Keyboard and mouse input events.
//!
//! Events carry no target: the document decides where a key event goes
//! (window-level listeners) and which element a mouse event hits (the caller
//! names the target node when dispatching).

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const ALT = 1 << 1;
        const CTRL = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// Logical key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Tab,
    /// Shift+Tab as reported by hosts that fold the modifier into the key.
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

/// Press/repeat/release phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Direction of sequential focus navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabDirection {
    Forward,
    Backward,
}

/// A single key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a key press with no modifiers.
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the event kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Press or auto-repeat. Releases never trigger actions.
    #[inline]
    pub fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Whether this is an Escape press.
    #[inline]
    pub fn is_escape(&self) -> bool {
        self.is_press() && self.code == KeyCode::Escape
    }

    /// Direction of focus movement when this is a Tab press.
    ///
    /// Both `Tab` + `SHIFT` and `BackTab` map to [`TabDirection::Backward`].
    pub fn tab_direction(&self) -> Option<TabDirection> {
        if !self.is_press() {
            return None;
        }
        match self.code {
            KeyCode::BackTab => Some(TabDirection::Backward),
            KeyCode::Tab if self.modifiers.contains(Modifiers::SHIFT) => {
                Some(TabDirection::Backward)
            }
            KeyCode::Tab => Some(TabDirection::Forward),
            _ => None,
        }
    }
}

/// Mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
}

/// Mouse event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
}

/// A mouse event. The hit target is supplied separately by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub const fn new(kind: MouseEventKind) -> Self {
        Self {
            kind,
            modifiers: Modifiers::NONE,
        }
    }

    /// Primary-button press.
    pub const fn left_down() -> Self {
        Self::new(MouseEventKind::Down(MouseButton::Left))
    }

    /// Primary-button release; a click completes on it.
    pub const fn left_up() -> Self {
        Self::new(MouseEventKind::Up(MouseButton::Left))
    }
}
