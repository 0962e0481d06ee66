use serde::{Deserialize, Serialize};

use crate::SidebarError;

/// Viewport classification against the mobile breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Mobile,
    Desktop,
}

impl Device {
    pub fn classify(viewport_width: f64, breakpoint_px: f64) -> Self {
        if viewport_width <= breakpoint_px {
            Device::Mobile
        } else {
            Device::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, Device::Mobile)
    }
}

/// Live page-lifetime state. Only `visible` is ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VisibilityState {
    pub visible: bool,
    pub device: Device,
}

impl VisibilityState {
    /// Initial state for a fresh page: a stored preference wins, otherwise
    /// the sidebar starts open on desktop and closed on mobile.
    pub fn restore(device: Device, preference: Option<bool>) -> Self {
        Self {
            visible: preference.unwrap_or(!device.is_mobile()),
            device,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.device.is_mobile()
    }

    /// The overlay is active only for an open sidebar on a mobile viewport.
    pub fn overlay_active(&self) -> bool {
        self.visible && self.is_mobile()
    }

    pub fn snapshot(&self) -> SidebarSnapshot {
        SidebarSnapshot {
            visible: self.visible,
            is_mobile: self.is_mobile(),
        }
    }
}

/// Read-only copy of the manager state handed to other components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarSnapshot {
    pub visible: bool,
    pub is_mobile: bool,
}

pub fn encode_preference(visible: bool) -> &'static str {
    if visible {
        "true"
    } else {
        "false"
    }
}

/// Only the literal strings written by `encode_preference` are accepted.
pub fn decode_preference(raw: &str) -> Result<bool, SidebarError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(SidebarError::MalformedPreference(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive() {
        assert_eq!(Device::classify(768.0, 768.0), Device::Mobile);
        assert_eq!(Device::classify(768.5, 768.0), Device::Desktop);
        assert_eq!(Device::classify(320.0, 768.0), Device::Mobile);
    }

    #[test]
    fn default_visibility_follows_device() {
        assert!(!VisibilityState::restore(Device::Mobile, None).visible);
        assert!(VisibilityState::restore(Device::Desktop, None).visible);
        assert!(VisibilityState::restore(Device::Mobile, Some(true)).visible);
        assert!(!VisibilityState::restore(Device::Desktop, Some(false)).visible);
    }

    #[test]
    fn overlay_only_for_open_mobile() {
        let combos = [
            (Device::Mobile, true, true),
            (Device::Mobile, false, false),
            (Device::Desktop, true, false),
            (Device::Desktop, false, false),
        ];
        for (device, visible, expected) in combos {
            let state = VisibilityState { visible, device };
            assert_eq!(state.overlay_active(), expected, "{device:?} visible={visible}");
        }
    }

    #[test]
    fn preference_is_strict() {
        assert_eq!(decode_preference(encode_preference(true)), Ok(true));
        assert_eq!(decode_preference("false"), Ok(false));
        assert!(decode_preference("TRUE").is_err());
        assert!(decode_preference(" true").is_err());
        assert!(decode_preference("").is_err());
    }

    #[test]
    fn snapshot_serializes_flat() {
        let snap = VisibilityState::restore(Device::Mobile, Some(true)).snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(json, r#"{"visible":true,"is_mobile":true}"#);
    }
}
