//! Preference Commands
//!
//! Theme and language persisted in `localStorage` and reflected on the
//! document element.

use recipe_core::preferences::STORAGE_KEY;
use recipe_core::Preferences;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

pub fn load_preferences() -> Preferences {
    let raw = local_storage().and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
    Preferences::from_stored(raw.as_deref())
}

pub fn save_preferences(prefs: &Preferences) {
    let Some(storage) = local_storage() else {
        tracing::warn!("[PREFS] localStorage unavailable, not saved");
        return;
    };
    if let Err(e) = storage.set_item(STORAGE_KEY, &prefs.to_stored()) {
        tracing::warn!(?e, "[PREFS] save failed");
    }
}

/// Set `data-theme`, `dir` and `lang` on `<html>`
pub fn apply_preferences(prefs: &Preferences) {
    let Some(root) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.document_element())
    else {
        return;
    };
    let _ = root.set_attribute("data-theme", prefs.theme.as_str());
    let _ = root.set_attribute("dir", prefs.dir());
    let _ = root.set_attribute("lang", &prefs.language);
}
