use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::host::{SidebarHost, Surface};
use crate::{SidebarError, UsageEvent};

/// Page-level counters shared between a `FakeHost` and the test holding a
/// clone of the `Rc`, so they stay readable after the host is consumed.
#[derive(Debug, Default)]
pub(crate) struct PageCounters {
    pub mutations: Cell<usize>,
    pub overlays: Cell<usize>,
    pub styles: Cell<usize>,
}

/// In-memory page used by the manager tests.
#[derive(Debug, Clone)]
pub(crate) struct FakeHost {
    pub width: f64,
    pub sidebar_present: bool,
    pub toggle_present: bool,
    pub storage_broken: bool,
    pub fail_dom: bool,
    /// Every write to this surface fails, as if the element were detached.
    pub fail_surface: Option<Surface>,
    pub fail_scroll: bool,
    pub fail_overlay: bool,
    pub stored: BTreeMap<String, String>,
    pub saved: Vec<(String, String)>,
    pub classes: BTreeMap<Surface, BTreeSet<String>>,
    pub attributes: BTreeMap<(Surface, String), String>,
    pub html: BTreeMap<Surface, String>,
    pub scroll_locked: bool,
    pub transition_suspensions: Vec<u32>,
    pub page: Rc<PageCounters>,
    pub usage: Vec<UsageEvent>,
}

impl FakeHost {
    pub const TIMESTAMP: &'static str = "2024-05-01T12:00:00.000Z";

    pub fn with_width(width: f64) -> Self {
        Self {
            width,
            sidebar_present: true,
            toggle_present: true,
            storage_broken: false,
            fail_dom: false,
            fail_surface: None,
            fail_scroll: false,
            fail_overlay: false,
            stored: BTreeMap::new(),
            saved: Vec::new(),
            classes: BTreeMap::new(),
            attributes: BTreeMap::new(),
            html: BTreeMap::new(),
            scroll_locked: false,
            transition_suspensions: Vec::new(),
            page: Rc::default(),
            usage: Vec::new(),
        }
    }

    pub fn with_preference(self, value: &str) -> Self {
        self.with_stored(crate::config::DEFAULT_STORAGE_KEY, value)
    }

    pub fn with_stored(mut self, key: &str, value: &str) -> Self {
        self.stored.insert(key.to_string(), value.to_string());
        self
    }

    pub fn without_sidebar(mut self) -> Self {
        self.sidebar_present = false;
        self
    }

    pub fn without_toggle(mut self) -> Self {
        self.toggle_present = false;
        self
    }

    pub fn with_broken_storage(mut self) -> Self {
        self.storage_broken = true;
        self
    }

    pub fn has_class(&self, surface: Surface, class: &str) -> bool {
        self.classes
            .get(&surface)
            .map_or(false, |set| set.contains(class))
    }

    pub fn attr(&self, surface: Surface, name: &str) -> Option<&str> {
        self.attributes
            .get(&(surface, name.to_string()))
            .map(String::as_str)
    }

    pub fn inner_html(&self, surface: Surface) -> Option<&str> {
        self.html.get(&surface).map(String::as_str)
    }

    pub fn failing_on(mut self, surface: Surface) -> Self {
        self.fail_surface = Some(surface);
        self
    }

    pub fn mutations(&self) -> usize {
        self.page.mutations.get()
    }

    fn mutate(&mut self) -> Result<(), SidebarError> {
        if self.fail_dom {
            return Err(SidebarError::Dom("detached node".into()));
        }
        self.page.mutations.set(self.page.mutations.get() + 1);
        Ok(())
    }

    fn mutate_surface(&mut self, surface: Surface) -> Result<(), SidebarError> {
        if self.fail_surface == Some(surface) {
            return Err(SidebarError::MissingElement(format!("{surface:?}")));
        }
        self.mutate()
    }
}

impl SidebarHost for FakeHost {
    fn locate(&mut self, sidebar_id: &str, toggle_id: &str) -> Result<(), SidebarError> {
        if !self.sidebar_present {
            return Err(SidebarError::MissingElement(sidebar_id.to_string()));
        }
        if !self.toggle_present {
            return Err(SidebarError::MissingElement(toggle_id.to_string()));
        }
        Ok(())
    }

    fn viewport_width(&self) -> f64 {
        self.width
    }

    fn timestamp(&self) -> String {
        Self::TIMESTAMP.to_string()
    }

    fn install_styles(&mut self, _css: &str) -> Result<(), SidebarError> {
        self.mutate()?;
        self.page.styles.set(self.page.styles.get() + 1);
        Ok(())
    }

    fn create_overlay(&mut self) -> Result<(), SidebarError> {
        if self.fail_overlay {
            return Err(SidebarError::Dom("body not appendable".into()));
        }
        self.mutate()?;
        self.page.overlays.set(self.page.overlays.get() + 1);
        self.attributes
            .insert((Surface::Overlay, "aria-hidden".into()), "true".into());
        Ok(())
    }

    fn set_class(&mut self, surface: Surface, class: &str, on: bool) -> Result<(), SidebarError> {
        self.mutate_surface(surface)?;
        let set = self.classes.entry(surface).or_default();
        if on {
            set.insert(class.to_string());
        } else {
            set.remove(class);
        }
        Ok(())
    }

    fn set_attribute(
        &mut self,
        surface: Surface,
        name: &str,
        value: &str,
    ) -> Result<(), SidebarError> {
        self.mutate_surface(surface)?;
        self.attributes
            .insert((surface, name.to_string()), value.to_string());
        Ok(())
    }

    fn set_inner_html(&mut self, surface: Surface, html: &str) -> Result<(), SidebarError> {
        self.mutate_surface(surface)?;
        self.html.insert(surface, html.to_string());
        Ok(())
    }

    fn set_scroll_locked(&mut self, locked: bool) -> Result<(), SidebarError> {
        if self.fail_scroll {
            return Err(SidebarError::Dom("body style locked".into()));
        }
        self.mutate()?;
        self.scroll_locked = locked;
        Ok(())
    }

    fn suspend_transition(&mut self, restore_after_ms: u32) -> Result<(), SidebarError> {
        self.mutate()?;
        self.transition_suspensions.push(restore_after_ms);
        Ok(())
    }

    fn load_preference(&self, key: &str) -> Result<Option<String>, SidebarError> {
        if self.storage_broken {
            return Err(SidebarError::StorageUnavailable("quota".into()));
        }
        Ok(self.stored.get(key).cloned())
    }

    fn save_preference(&mut self, key: &str, value: &str) -> Result<(), SidebarError> {
        if self.storage_broken {
            return Err(SidebarError::StorageUnavailable("quota".into()));
        }
        self.stored.insert(key.to_string(), value.to_string());
        self.saved.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn record_usage(&mut self, event: &UsageEvent) {
        self.usage.push(event.clone());
    }
}
