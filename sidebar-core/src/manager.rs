use crate::events::{KeyInput, KeyOutcome, ThemeChange, UsageEvent};
use crate::host::{SidebarHost, Surface};
use crate::icon::{ToggleIcon, SIDEBAR_STYLES, TOGGLE_ARIA_LABEL, TOGGLE_BUTTON_MARKUP, TOGGLE_TITLE};
use crate::state::{decode_preference, encode_preference, Device, SidebarSnapshot, VisibilityState};
use crate::{SidebarConfig, SidebarError};

const VISIBLE_CLASS: &str = "visible";
const HIDDEN_CLASS: &str = "hidden";
const ACTIVE_CLASS: &str = "active";

/// Owns sidebar visibility for one page. The DOM is a projection of
/// `state`; it is written on every apply and never read back.
pub struct SidebarManager<H: SidebarHost> {
    host: H,
    config: SidebarConfig,
    state: VisibilityState,
}

impl<H: SidebarHost> SidebarManager<H> {
    /// Locate the sidebar, build the overlay and icon, then restore the
    /// persisted preference without animating. Pages without the sidebar
    /// markup get `Err(MissingElement)` and an untouched document.
    pub fn initialize(mut host: H, config: SidebarConfig) -> Result<Self, SidebarError> {
        if let Err(err) = host.locate(&config.sidebar_id, &config.toggle_id) {
            log::warn!("Sidebar elements not found: {err}");
            return Err(err);
        }

        let device = Device::classify(host.viewport_width(), config.mobile_breakpoint_px);
        let preference = read_preference(&host, &config.storage_key);
        let mut manager = Self {
            host,
            config,
            state: VisibilityState::restore(device, preference),
        };

        if let Err(err) = manager.host.create_overlay() {
            log::warn!("sidebar overlay not created: {err}");
            return Err(err);
        }
        if let Err(err) = manager.host.install_styles(SIDEBAR_STYLES) {
            log::debug!("sidebar styles not installed: {err}");
        }
        manager.setup_toggle_button();
        manager.apply_state(false);

        log::info!("Sidebar initialized ({device:?}, visible={})", manager.state.visible);
        Ok(manager)
    }

    pub fn state(&self) -> SidebarSnapshot {
        self.state.snapshot()
    }

    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn toggle(&mut self) {
        self.state.visible = !self.state.visible;
        self.apply_state(true);
        self.save_preference();
        self.track_usage();
    }

    pub fn show(&mut self) {
        if !self.state.visible {
            self.toggle();
        }
    }

    pub fn hide(&mut self) {
        if self.state.visible {
            self.toggle();
        }
    }

    /// Reclassify the viewport. Only a mobile/desktop flip touches the page.
    pub fn handle_resize(&mut self) {
        let was_mobile = self.state.is_mobile();
        self.state.device = Device::classify(
            self.host.viewport_width(),
            self.config.mobile_breakpoint_px,
        );
        if was_mobile == self.state.is_mobile() {
            return;
        }

        if self.state.is_mobile() {
            if self.state.visible {
                self.apply_state(false);
            }
        } else {
            // Desktop never shows the overlay, whatever `visible` says.
            step(self.host.set_scroll_locked(false), "scroll unlock");
            step(
                self.host.set_class(Surface::Overlay, ACTIVE_CLASS, false),
                "overlay reset",
            );
        }
    }

    pub fn handle_key(&mut self, input: &KeyInput) -> KeyOutcome {
        if input.is_toggle_shortcut() {
            self.toggle();
            return KeyOutcome::Toggled {
                prevent_default: true,
            };
        }
        if input.is_escape() && self.state.overlay_active() {
            self.toggle();
            return KeyOutcome::Toggled {
                prevent_default: false,
            };
        }
        KeyOutcome::Ignored
    }

    /// Clicking the dimmed backdrop closes an open mobile sidebar.
    pub fn handle_overlay_click(&mut self) -> bool {
        if self.state.overlay_active() {
            self.toggle();
            true
        } else {
            false
        }
    }

    pub fn handle_theme_change(&self, change: &ThemeChange) {
        log::info!("Sidebar adapting to {} theme", change.theme);
    }

    /// Project the logical state onto the page. Each write stands alone: a
    /// failed one is logged and the rest still run. The in-memory state is
    /// never rolled back.
    pub fn apply_state(&mut self, animate: bool) {
        let visible = self.state.visible;
        let host = &mut self.host;

        if !animate {
            step(
                host.suspend_transition(self.config.transition_restore_ms),
                "transition suspend",
            );
        }

        step(host.set_class(Surface::Sidebar, VISIBLE_CLASS, visible), "sidebar visible class");
        step(host.set_class(Surface::Sidebar, HIDDEN_CLASS, !visible), "sidebar hidden class");
        step(
            host.set_attribute(Surface::Sidebar, "aria-hidden", encode_preference(!visible)),
            "sidebar aria-hidden",
        );

        if visible {
            if self.state.is_mobile() {
                step(host.set_class(Surface::Overlay, ACTIVE_CLASS, true), "overlay activate");
                step(host.set_scroll_locked(true), "scroll lock");
            }
        } else {
            step(host.set_class(Surface::Overlay, ACTIVE_CLASS, false), "overlay deactivate");
            step(host.set_scroll_locked(false), "scroll unlock");
        }

        let icon = ToggleIcon::for_visibility(visible);
        step(host.set_inner_html(Surface::ToggleIcon, icon.markup()), "toggle icon");
        step(
            host.set_attribute(Surface::ToggleIcon, "aria-label", icon.aria_label()),
            "toggle icon label",
        );

        step(
            host.set_attribute(Surface::Toggle, "aria-expanded", encode_preference(visible)),
            "toggle aria-expanded",
        );
        step(host.set_class(Surface::Toggle, ACTIVE_CLASS, visible), "toggle active class");
    }

    fn setup_toggle_button(&mut self) {
        let host = &mut self.host;
        step(host.set_inner_html(Surface::Toggle, TOGGLE_BUTTON_MARKUP), "toggle markup");
        step(
            host.set_attribute(Surface::Toggle, "aria-label", TOGGLE_ARIA_LABEL),
            "toggle aria-label",
        );
        step(host.set_attribute(Surface::Toggle, "title", TOGGLE_TITLE), "toggle title");
    }

    fn save_preference(&mut self) {
        let value = encode_preference(self.state.visible);
        if let Err(err) = self.host.save_preference(&self.config.storage_key, value) {
            log::warn!("sidebar preference not saved: {err}");
        }
    }

    fn track_usage(&mut self) {
        if !self.config.track_usage {
            return;
        }
        let event = UsageEvent::toggle(self.state.visible, self.state.device, self.host.timestamp());
        self.host.record_usage(&event);
    }
}

/// Log a failed page write and carry on.
fn step(result: Result<(), SidebarError>, what: &str) {
    if let Err(err) = result {
        log::warn!("sidebar {what} skipped: {err}");
    }
}

fn read_preference<H: SidebarHost>(host: &H, key: &str) -> Option<bool> {
    let raw = match host.load_preference(key) {
        Ok(raw) => raw?,
        Err(err) => {
            log::warn!("{err}; using default visibility");
            return None;
        }
    };
    match decode_preference(&raw) {
        Ok(visible) => Some(visible),
        Err(err) => {
            log::debug!("{err}; ignoring stored preference");
            None
        }
    }
}
