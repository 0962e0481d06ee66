use std::cell::RefCell;
use std::rc::Rc;

use sidebar_core::{KeyInput, KeyOutcome, SidebarError, SidebarManager};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Event, EventTarget, KeyboardEvent};

use crate::dom::{dom_err, WebHost};
use crate::theme_from_detail_json;

pub(crate) type SharedManager = Rc<RefCell<SidebarManager<WebHost>>>;

/// Run `f` against the manager unless it is already borrowed further up the
/// stack (e.g. a JS caller re-entering from inside a handler).
pub(crate) fn with_manager<R>(
    manager: &SharedManager,
    f: impl FnOnce(&mut SidebarManager<WebHost>) -> R,
) -> Option<R> {
    match manager.try_borrow_mut() {
        Ok(mut guard) => Some(f(&mut guard)),
        Err(_) => {
            log::debug!("sidebar busy; event dropped");
            None
        }
    }
}

/// Listeners live for the page lifetime, so the closures are leaked.
fn listen(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), SidebarError> {
    let cb = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    target
        .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
        .map_err(|e| dom_err(name, e))?;
    cb.forget();
    Ok(())
}

/// Wire toggle click, overlay click, keyboard shortcuts, resize and
/// `themeChange` to the manager.
pub(crate) fn attach(manager: &SharedManager) -> Result<(), SidebarError> {
    let (window, document, toggle, overlay) = {
        let guard = manager.borrow();
        let host = guard.host();
        (
            host.window().clone(),
            host.document().clone(),
            host.toggle_element().cloned(),
            host.overlay_element().cloned(),
        )
    };

    if let Some(toggle) = toggle {
        let m = manager.clone();
        listen(&toggle, "click", move |ev: Event| {
            ev.prevent_default();
            ev.stop_propagation();
            with_manager(&m, |s| s.toggle());
        })?;
    }

    if let Some(overlay) = overlay {
        let m = manager.clone();
        listen(&overlay, "click", move |_ev: Event| {
            with_manager(&m, |s| s.handle_overlay_click());
        })?;
    }

    {
        let m = manager.clone();
        listen(&document, "keydown", move |ev: Event| {
            let Some(key_ev) = ev.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let input = KeyInput::new(key_ev.key(), key_ev.ctrl_key(), key_ev.meta_key());
            let outcome = with_manager(&m, |s| s.handle_key(&input));
            if let Some(KeyOutcome::Toggled {
                prevent_default: true,
            }) = outcome
            {
                key_ev.prevent_default();
            }
        })?;
    }

    {
        let m = manager.clone();
        listen(&window, "resize", move |_ev: Event| {
            with_manager(&m, |s| s.handle_resize());
        })?;
    }

    {
        let m = manager.clone();
        listen(&window, "themeChange", move |ev: Event| {
            let Some(custom) = ev.dyn_ref::<CustomEvent>() else {
                return;
            };
            let detail = js_sys::JSON::stringify(&custom.detail())
                .ok()
                .and_then(|json| json.as_string());
            match detail.as_deref().and_then(theme_from_detail_json) {
                Some(change) => {
                    with_manager(&m, |s| s.handle_theme_change(&change));
                }
                None => log::debug!("themeChange without a theme detail"),
            }
        })?;
    }

    Ok(())
}
