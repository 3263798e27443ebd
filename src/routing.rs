//! Browser History Bridge
//!
//! Reads the location path and pushes/replaces history entries. The
//! navigator decides paths; this module only talks to the browser.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Current `location.pathname`, `/` when unavailable
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|win| win.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn history() -> Option<web_sys::History> {
    web_sys::window().and_then(|win| win.history().ok())
}

/// New history entry (user navigation)
pub fn push_path(path: &str) {
    if path == current_path() {
        return;
    }
    if let Some(history) = history() {
        if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)) {
            tracing::warn!(?e, path, "pushState failed");
        }
    }
}

/// Rewrite the current entry (renames, deleted selections)
pub fn replace_path(path: &str) {
    if let Some(history) = history() {
        if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)) {
            tracing::warn!(?e, path, "replaceState failed");
        }
    }
}

/// Call `on_change` with the new path on back/forward
pub fn bind_popstate<F>(on_change: F)
where
    F: Fn(String) + 'static,
{
    let on_popstate = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
        move |_ev: web_sys::PopStateEvent| {
            on_change(current_path());
        },
    );
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
    }
    on_popstate.forget();
}
