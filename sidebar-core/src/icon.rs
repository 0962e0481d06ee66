//! Markup projected into the page: toggle glyphs and the injected stylesheet.

pub const TOGGLE_ARIA_LABEL: &str = "Toggle navigation sidebar";
pub const TOGGLE_TITLE: &str = "Toggle Sidebar";
pub const ICON_SELECTOR: &str = ".sidebar-icon";
pub const STYLE_ELEMENT_ID: &str = "sidebar-manager-styles";

/// Initial button content; the inner `.sidebar-icon` is rewritten on every apply.
pub const TOGGLE_BUTTON_MARKUP: &str = r#"<svg class="sidebar-icon" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
<rect x="3" y="3" width="18" height="18" rx="2" ry="2"></rect>
<line x1="9" y1="9" x2="15" y2="9"></line>
<line x1="9" y1="12" x2="15" y2="12"></line>
<line x1="9" y1="15" x2="15" y2="15"></line>
</svg>"#;

const OPEN_GLYPH: &str = r#"<rect x="3" y="3" width="18" height="18" rx="2" ry="2"></rect>
<line x1="9" y1="9" x2="15" y2="9"></line>
<line x1="9" y1="12" x2="15" y2="12"></line>
<line x1="9" y1="15" x2="15" y2="15"></line>"#;

const CLOSE_GLYPH: &str = r#"<line x1="18" y1="6" x2="6" y2="18"></line>
<line x1="6" y1="6" x2="18" y2="18"></line>"#;

pub const SIDEBAR_STYLES: &str = r#"
.sidebar-overlay {
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.45);
  opacity: 0;
  pointer-events: none;
  transition: opacity 200ms ease-out;
  z-index: 999;
}
.sidebar-overlay.active { opacity: 1; pointer-events: auto; }
#sidebar { transition: transform 250ms ease-out, width 250ms ease-out; }
#sidebar.hidden { transform: translateX(-100%); }
#sidebar.visible { transform: translateX(0); }
#toggleSidebar.active { color: var(--accent, #2563eb); }
@media (max-width: 768px) {
  #sidebar { position: fixed; top: 0; bottom: 0; left: 0; z-index: 1000; }
}
"#;

/// Which action the toggle glyph currently offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIcon {
    Open,
    Close,
}

impl ToggleIcon {
    /// An open sidebar shows the close glyph and vice versa.
    pub fn for_visibility(visible: bool) -> Self {
        if visible {
            ToggleIcon::Close
        } else {
            ToggleIcon::Open
        }
    }

    pub fn markup(self) -> &'static str {
        match self {
            ToggleIcon::Open => OPEN_GLYPH,
            ToggleIcon::Close => CLOSE_GLYPH,
        }
    }

    pub fn aria_label(self) -> &'static str {
        match self {
            ToggleIcon::Open => "Open sidebar",
            ToggleIcon::Close => "Close sidebar",
        }
    }
}
