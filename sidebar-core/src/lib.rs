//! Sidebar visibility state machine, independent of any browser API.
//!
//! `SidebarManager` keeps one boolean of user intent (`visible`) reconciled
//! against the viewport class and projects it onto the page through a
//! `SidebarHost`. The `sidebar-web` crate provides the DOM host.

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod icon;
pub mod manager;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::SidebarConfig;
pub use error::SidebarError;
pub use events::{KeyInput, KeyOutcome, ThemeChange, UsageEvent, UsageState};
pub use host::{SidebarHost, Surface};
pub use icon::ToggleIcon;
pub use manager::SidebarManager;
pub use state::{decode_preference, encode_preference, Device, SidebarSnapshot};
