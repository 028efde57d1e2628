#![forbid(unsafe_code)]

//! Modal behavior configuration.

/// Accessible label used for the header close button by default.
pub const DEFAULT_CLOSE_LABEL: &str = "Close dialog";

/// Modal configuration.
///
/// Defaults give the full accessible-dialog contract; each switch turns one
/// behavior off for hosts that manage it themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModalConfig {
    pub close_on_escape: bool,
    pub close_on_backdrop: bool,
    pub lock_scroll: bool,
    pub restore_focus: bool,
    pub show_close_button: bool,
    pub close_label: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            close_on_escape: true,
            close_on_backdrop: true,
            lock_scroll: true,
            restore_focus: true,
            show_close_button: true,
            close_label: DEFAULT_CLOSE_LABEL.to_owned(),
        }
    }
}

impl ModalConfig {
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }

    pub fn lock_scroll(mut self, lock: bool) -> Self {
        self.lock_scroll = lock;
        self
    }

    pub fn restore_focus(mut self, restore: bool) -> Self {
        self.restore_focus = restore;
        self
    }

    pub fn show_close_button(mut self, show: bool) -> Self {
        self.show_close_button = show;
        self
    }

    pub fn close_label(mut self, label: impl Into<String>) -> Self {
        self.close_label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let config = ModalConfig::default();
        assert!(config.close_on_escape);
        assert!(config.close_on_backdrop);
        assert!(config.lock_scroll);
        assert!(config.restore_focus);
        assert!(config.show_close_button);
        assert_eq!(config.close_label, "Close dialog");
    }

    #[test]
    fn builder_chain() {
        let config = ModalConfig::default()
            .close_on_backdrop(false)
            .close_label("Dismiss");
        assert!(!config.close_on_backdrop);
        assert!(config.close_on_escape);
        assert_eq!(config.close_label, "Dismiss");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_defaults() {
        let config: ModalConfig =
            serde_json::from_str(r#"{"close_on_backdrop": false}"#).unwrap();
        assert_eq!(config, ModalConfig::default().close_on_backdrop(false));
    }
}
