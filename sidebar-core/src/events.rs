use serde::{Deserialize, Serialize};

use crate::state::Device;

/// Keyboard input reduced to what the shortcuts look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool, meta: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
            meta,
        }
    }

    pub(crate) fn is_toggle_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && self.key == "b"
    }

    pub(crate) fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    /// The sidebar toggled; the caller should suppress the browser default
    /// when `prevent_default` is set (Ctrl/Cmd+B would open bookmarks).
    Toggled { prevent_default: bool },
}

/// Detail payload of the page-wide `themeChange` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChange {
    pub theme: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageState {
    Opened,
    Closed,
}

/// Best-effort analytics record emitted after every toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub action: String,
    pub state: UsageState,
    pub device: Device,
    pub timestamp: String,
}

impl UsageEvent {
    pub const TOGGLE_ACTION: &'static str = "sidebar_toggle";

    pub fn toggle(visible: bool, device: Device, timestamp: String) -> Self {
        Self {
            action: Self::TOGGLE_ACTION.to_string(),
            state: if visible {
                UsageState::Opened
            } else {
                UsageState::Closed
            },
            device,
            timestamp,
        }
    }
}
