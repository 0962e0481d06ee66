use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::SidebarError;

pub const DEFAULT_SIDEBAR_ID: &str = "sidebar";
pub const DEFAULT_TOGGLE_ID: &str = "toggleSidebar";
pub const DEFAULT_STORAGE_KEY: &str = "sidebarVisible";
pub const DEFAULT_MOBILE_BREAKPOINT_PX: f64 = 768.0;
pub const DEFAULT_TRANSITION_RESTORE_MS: u32 = 50;

/// Sidebar wiring and tuning. Every field is optional in JSON form; missing
/// fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    pub sidebar_id: String,
    pub toggle_id: String,
    pub storage_key: String,
    /// Widths at or below this are classified as mobile.
    pub mobile_breakpoint_px: f64,
    /// How long the sidebar transition stays disabled after a non-animated apply.
    pub transition_restore_ms: u32,
    pub track_usage: bool,
    pub log_level: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            sidebar_id: DEFAULT_SIDEBAR_ID.to_string(),
            toggle_id: DEFAULT_TOGGLE_ID.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            transition_restore_ms: DEFAULT_TRANSITION_RESTORE_MS,
            track_usage: true,
            log_level: "info".to_string(),
        }
    }
}

impl SidebarConfig {
    pub fn from_json(raw: &str) -> Result<Self, SidebarError> {
        let config: SidebarConfig =
            serde_json::from_str(raw).map_err(|e| SidebarError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Config from an optional page-supplied JSON blob. Anything unusable
    /// falls back to defaults.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::default(),
            Some(raw) => Self::from_json(raw).unwrap_or_else(|err| {
                log::warn!("{err}; using default sidebar config");
                Self::default()
            }),
        }
    }

    pub fn validate(&self) -> Result<(), SidebarError> {
        if self.sidebar_id.trim().is_empty() || self.toggle_id.trim().is_empty() {
            return Err(SidebarError::Config("element ids must not be empty".into()));
        }
        if self.storage_key.is_empty() {
            return Err(SidebarError::Config("storage key must not be empty".into()));
        }
        if !self.mobile_breakpoint_px.is_finite() || self.mobile_breakpoint_px <= 0.0 {
            return Err(SidebarError::Config(format!(
                "breakpoint must be positive, got {}",
                self.mobile_breakpoint_px
            )));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}
