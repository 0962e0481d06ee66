//! Browser binding for `sidebar-core`.
//!
//! The page bootstrap calls `start()` once the document is parsed and keeps
//! the returned `SidebarHandle`; other components receive that handle
//! instead of reaching for a global.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod logger;

use sidebar_core::ThemeChange;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use log::LevelFilter;
#[cfg(target_arch = "wasm32")]
use sidebar_core::{SidebarConfig, SidebarManager, SidebarSnapshot};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use dom::WebHost;

/// Body attribute carrying an optional JSON `SidebarConfig`.
pub const CONFIG_ATTRIBUTE: &str = "data-sidebar-config";

/// Parse the JSON form of a `themeChange` event detail.
pub fn theme_from_detail_json(raw: &str) -> Option<ThemeChange> {
    serde_json::from_str::<ThemeChange>(raw).ok()
}

/// Initialize the sidebar for the current page. Returns `undefined` to JS
/// when the page has no sidebar markup.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start() -> Option<SidebarHandle> {
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Info);

    let host = match WebHost::new() {
        Ok(host) => host,
        Err(err) => {
            log::warn!("sidebar disabled: {err}");
            return None;
        }
    };
    let config = SidebarConfig::resolve(host.config_attribute().as_deref());
    log::set_max_level(config.level_filter());

    let manager = SidebarManager::initialize(host, config).ok()?;
    let shared = Rc::new(RefCell::new(manager));
    if let Err(err) = listeners::attach(&shared) {
        log::warn!("sidebar listeners incomplete: {err}");
    }
    Some(SidebarHandle { inner: shared })
}

/// Shared handle to the page's sidebar manager.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
#[derive(Clone)]
pub struct SidebarHandle {
    inner: listeners::SharedManager,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl SidebarHandle {
    pub fn toggle(&self) {
        listeners::with_manager(&self.inner, |m| m.toggle());
    }

    pub fn show(&self) {
        listeners::with_manager(&self.inner, |m| m.show());
    }

    pub fn hide(&self) {
        listeners::with_manager(&self.inner, |m| m.hide());
    }

    #[wasm_bindgen(getter, js_name = isVisible)]
    pub fn is_visible(&self) -> bool {
        self.snapshot().visible
    }

    #[wasm_bindgen(getter, js_name = isMobile)]
    pub fn is_mobile(&self) -> bool {
        self.snapshot().is_mobile
    }

    /// `{"visible": bool, "is_mobile": bool}` for host-side consumers.
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl SidebarHandle {
    /// Copy of the current state for Rust-side consumers.
    pub fn snapshot(&self) -> SidebarSnapshot {
        self.inner.borrow().state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_detail_requires_theme_field() {
        let change = theme_from_detail_json(r#"{"theme":"dark","source":"toggle"}"#).unwrap();
        assert_eq!(change.theme, "dark");
        assert!(theme_from_detail_json("{}").is_none());
        assert!(theme_from_detail_json("undefined").is_none());
    }
}
