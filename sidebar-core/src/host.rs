use crate::{SidebarError, UsageEvent};

/// Page elements the manager projects state onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Surface {
    Sidebar,
    Toggle,
    /// The `.sidebar-icon` inside the toggle button.
    ToggleIcon,
    Overlay,
}

/// Everything the manager needs from the page. The browser binding talks to
/// the DOM and `localStorage`; tests use an in-memory host.
///
/// Implementations must not mutate the page in `locate`: a failed lookup
/// leaves the document untouched.
pub trait SidebarHost {
    /// Resolve the sidebar and its toggle control.
    fn locate(&mut self, sidebar_id: &str, toggle_id: &str) -> Result<(), SidebarError>;
    fn viewport_width(&self) -> f64;
    /// ISO-8601 wall clock, used only for usage events.
    fn timestamp(&self) -> String;

    /// Insert the stylesheet once; repeated calls are no-ops.
    fn install_styles(&mut self, css: &str) -> Result<(), SidebarError>;
    /// Append the overlay element to the document body.
    fn create_overlay(&mut self) -> Result<(), SidebarError>;
    fn set_class(&mut self, surface: Surface, class: &str, on: bool) -> Result<(), SidebarError>;
    fn set_attribute(&mut self, surface: Surface, name: &str, value: &str)
        -> Result<(), SidebarError>;
    fn set_inner_html(&mut self, surface: Surface, html: &str) -> Result<(), SidebarError>;
    /// Lock or release page scrolling behind the mobile overlay.
    fn set_scroll_locked(&mut self, locked: bool) -> Result<(), SidebarError>;
    /// Disable the sidebar transition now and restore it after `restore_after_ms`.
    fn suspend_transition(&mut self, restore_after_ms: u32) -> Result<(), SidebarError>;

    fn load_preference(&self, key: &str) -> Result<Option<String>, SidebarError>;
    fn save_preference(&mut self, key: &str, value: &str) -> Result<(), SidebarError>;

    fn record_usage(&mut self, event: &UsageEvent) {
        match serde_json::to_string(event) {
            Ok(json) => log::info!("Sidebar usage: {json}"),
            Err(err) => log::debug!("usage event not serializable: {err}"),
        }
    }
}
