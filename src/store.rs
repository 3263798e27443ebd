//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use recipe_core::{Catalog, CatalogSession, DomainError, FlightKey, Intent, Navigator, Preferences};

/// Whole-catalog load status
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    /// Nothing could be loaded; the message is shown with a reload action
    Failed(String),
}

/// Message strip under the header
#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub message: String,
    /// Intent to re-dispatch when the user presses Retry
    pub retry: Option<Intent>,
}

impl Banner {
    pub fn from_error(err: &DomainError) -> Self {
        Self {
            message: err.to_string(),
            retry: err.retry_intent().cloned(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retry: None,
        }
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Local catalog and in-flight commits
    pub session: CatalogSession,
    /// Current route and the selection derived from it
    pub navigator: Navigator,
    pub preferences: Preferences,
    pub load: LoadState,
    pub banner: Option<Banner>,
    /// 1-based recipe grid page
    pub page: usize,
    /// Category/recipe rearranging and deleting is enabled
    pub edit_mode: bool,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Snapshot of the local catalog (untracked)
pub fn store_catalog(store: &UiStore) -> Catalog {
    store.session().with_untracked(|s| s.catalog().clone())
}

/// Whether a commit for this entity is still in flight (tracked)
pub fn store_is_busy(store: &UiStore, key: &FlightKey) -> bool {
    store.session().with(|s| s.is_busy(key))
}

pub fn store_show_error(store: &UiStore, err: &DomainError) {
    store.banner().set(Some(Banner::from_error(err)));
}

pub fn store_show_info(store: &UiStore, message: impl Into<String>) {
    store.banner().set(Some(Banner::info(message)));
}

pub fn store_clear_banner(store: &UiStore) {
    store.banner().set(None);
}
