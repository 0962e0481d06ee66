use gloo_timers::future::TimeoutFuture;
use js_sys::Date;
use sidebar_core::icon::{ICON_SELECTOR, STYLE_ELEMENT_ID};
use sidebar_core::{SidebarError, SidebarHost, Surface};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, Storage, Window};

use crate::CONFIG_ATTRIBUTE;

const OVERLAY_CLASS: &str = "sidebar-overlay";

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

pub(crate) fn dom_err(context: &str, err: JsValue) -> SidebarError {
    SidebarError::Dom(format!("{context}: {}", describe(&err)))
}

fn storage_err(err: JsValue) -> SidebarError {
    SidebarError::StorageUnavailable(describe(&err))
}

/// `SidebarHost` backed by the live document and `localStorage`.
pub struct WebHost {
    window: Window,
    document: Document,
    sidebar: Option<HtmlElement>,
    toggle: Option<HtmlElement>,
    overlay: Option<HtmlElement>,
}

impl WebHost {
    pub fn new() -> Result<Self, SidebarError> {
        let window = web_sys::window().ok_or_else(|| SidebarError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| SidebarError::Dom("no document".into()))?;
        Ok(Self {
            window,
            document,
            sidebar: None,
            toggle: None,
            overlay: None,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn toggle_element(&self) -> Option<&HtmlElement> {
        self.toggle.as_ref()
    }

    pub fn overlay_element(&self) -> Option<&HtmlElement> {
        self.overlay.as_ref()
    }

    /// Raw JSON config from `<body data-sidebar-config="...">`, if present.
    pub fn config_attribute(&self) -> Option<String> {
        self.document.body()?.get_attribute(CONFIG_ATTRIBUTE)
    }

    fn find_html(&self, id: &str) -> Result<HtmlElement, SidebarError> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| SidebarError::MissingElement(id.to_string()))
    }

    fn body(&self) -> Result<HtmlElement, SidebarError> {
        self.document
            .body()
            .ok_or_else(|| SidebarError::MissingElement("body".into()))
    }

    fn element(&self, surface: Surface) -> Result<Element, SidebarError> {
        let found: Option<Element> = match surface {
            Surface::Sidebar => self.sidebar.clone().map(Element::from),
            Surface::Toggle => self.toggle.clone().map(Element::from),
            Surface::Overlay => self.overlay.clone().map(Element::from),
            Surface::ToggleIcon => self
                .toggle
                .as_ref()
                .and_then(|toggle| toggle.query_selector(ICON_SELECTOR).ok().flatten()),
        };
        found.ok_or_else(|| SidebarError::MissingElement(format!("{surface:?}")))
    }

    fn storage(&self) -> Result<Storage, SidebarError> {
        self.window
            .local_storage()
            .map_err(storage_err)?
            .ok_or_else(|| SidebarError::StorageUnavailable("localStorage unavailable".into()))
    }
}

impl SidebarHost for WebHost {
    fn locate(&mut self, sidebar_id: &str, toggle_id: &str) -> Result<(), SidebarError> {
        let sidebar = self.find_html(sidebar_id)?;
        let toggle = self.find_html(toggle_id)?;
        self.sidebar = Some(sidebar);
        self.toggle = Some(toggle);
        Ok(())
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .or_else(|| {
                self.document
                    .document_element()
                    .map(|root| f64::from(root.client_width()))
            })
            .unwrap_or(0.0)
    }

    fn timestamp(&self) -> String {
        Date::new_0().to_iso_string().into()
    }

    fn install_styles(&mut self, css: &str) -> Result<(), SidebarError> {
        if self.document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
            return Ok(());
        }
        let style = self
            .document
            .create_element("style")
            .map_err(|e| dom_err("create style", e))?;
        style.set_id(STYLE_ELEMENT_ID);
        style.set_text_content(Some(css));
        let parent: Element = match self.document.head() {
            Some(head) => head.into(),
            None => self.body()?.into(),
        };
        parent
            .append_child(&style)
            .map_err(|e| dom_err("append style", e))?;
        Ok(())
    }

    fn create_overlay(&mut self) -> Result<(), SidebarError> {
        let overlay: HtmlElement = self
            .document
            .create_element("div")
            .map_err(|e| dom_err("create overlay", e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SidebarError::Dom("overlay is not an HTMLElement".into()))?;
        overlay.set_class_name(OVERLAY_CLASS);
        overlay
            .set_attribute("aria-hidden", "true")
            .map_err(|e| dom_err("overlay aria-hidden", e))?;
        self.body()?
            .append_child(&overlay)
            .map_err(|e| dom_err("append overlay", e))?;
        self.overlay = Some(overlay);
        Ok(())
    }

    fn set_class(&mut self, surface: Surface, class: &str, on: bool) -> Result<(), SidebarError> {
        self.element(surface)?
            .class_list()
            .toggle_with_force(class, on)
            .map_err(|e| dom_err(class, e))?;
        Ok(())
    }

    fn set_attribute(
        &mut self,
        surface: Surface,
        name: &str,
        value: &str,
    ) -> Result<(), SidebarError> {
        self.element(surface)?
            .set_attribute(name, value)
            .map_err(|e| dom_err(name, e))
    }

    fn set_inner_html(&mut self, surface: Surface, html: &str) -> Result<(), SidebarError> {
        self.element(surface)?.set_inner_html(html);
        Ok(())
    }

    fn set_scroll_locked(&mut self, locked: bool) -> Result<(), SidebarError> {
        let style = self.body()?.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        result.map_err(|e| dom_err("body overflow", e))
    }

    fn suspend_transition(&mut self, restore_after_ms: u32) -> Result<(), SidebarError> {
        let sidebar = self
            .sidebar
            .clone()
            .ok_or_else(|| SidebarError::MissingElement("sidebar".into()))?;
        sidebar
            .style()
            .set_property("transition", "none")
            .map_err(|e| dom_err("suspend transition", e))?;
        spawn_local(async move {
            TimeoutFuture::new(restore_after_ms).await;
            let _ = sidebar.style().remove_property("transition");
        });
        Ok(())
    }

    fn load_preference(&self, key: &str) -> Result<Option<String>, SidebarError> {
        self.storage()?.get_item(key).map_err(storage_err)
    }

    fn save_preference(&mut self, key: &str, value: &str) -> Result<(), SidebarError> {
        self.storage()?.set_item(key, value).map_err(storage_err)
    }
}
