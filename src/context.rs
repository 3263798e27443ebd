//! Application Context
//!
//! Backend handles shared via Leptos Context API. The store accessor and
//! AI client live in local (non-Send) storage; the handles themselves are
//! `Copy`.

use std::rc::Rc;

use leptos::prelude::*;
use recipe_core::generation::GenerationClient;
use recipe_core::{AppConfig, HttpRecipeStore, MemoryRecipeStore, RecipeStore};
use rolling_logger::LogBuffer;

/// App-wide backend handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    store: StoredValue<Rc<dyn RecipeStore>, LocalStorage>,
    generation: StoredValue<Option<GenerationClient>, LocalStorage>,
    pub config: StoredValue<AppConfig>,
    pub logs: StoredValue<LogBuffer>,
}

impl AppContext {
    pub fn new(config: AppConfig, logs: LogBuffer) -> Self {
        let store = build_store(&config);
        let generation = GenerationClient::from_config(&config);
        Self {
            store: StoredValue::new_local(store),
            generation: StoredValue::new_local(generation),
            config: StoredValue::new(config),
            logs: StoredValue::new(logs),
        }
    }

    /// Shared handle to the store accessor
    pub fn store(&self) -> Rc<dyn RecipeStore> {
        self.store.get_value()
    }

    pub fn generation(&self) -> Option<GenerationClient> {
        self.generation.get_value()
    }

    pub fn has_generation(&self) -> bool {
        self.generation.with_value(Option::is_some)
    }

    pub fn page_size(&self) -> usize {
        self.config.with_value(|c| c.page_size)
    }

    pub fn is_offline(&self) -> bool {
        self.config.with_value(AppConfig::is_offline)
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

/// Read deployment settings baked in at build time
pub fn load_config() -> AppConfig {
    let lookup = |key: &str| -> Option<String> {
        let value = match key {
            recipe_core::config::API_URL_KEY => option_env!("RECIPE_BOX_API_URL"),
            recipe_core::config::API_TOKEN_KEY => option_env!("RECIPE_BOX_API_TOKEN"),
            recipe_core::config::AI_URL_KEY => option_env!("RECIPE_BOX_AI_URL"),
            recipe_core::config::PAGE_SIZE_KEY => option_env!("RECIPE_BOX_PAGE_SIZE"),
            _ => None,
        };
        value.map(str::to_string)
    };
    AppConfig::from_lookup(lookup).unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid build configuration, running offline");
        AppConfig::default()
    })
}

fn build_store(config: &AppConfig) -> Rc<dyn RecipeStore> {
    if let Some(http) = HttpRecipeStore::from_config(config) {
        tracing::info!("using remote catalog store");
        return Rc::new(http);
    }
    match MemoryRecipeStore::demo() {
        Ok(store) => {
            tracing::info!("no API configured, using the bundled demo catalog");
            Rc::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "demo catalog unreadable, starting empty");
            Rc::new(MemoryRecipeStore::new())
        }
    }
}

/// Drag state for the two sortable lists; bound once at the app root
#[derive(Clone, Copy)]
pub struct DragContext {
    pub categories: leptos_dragdrop::DndSignals,
    pub recipes: leptos_dragdrop::DndSignals,
}

pub fn use_drag_context() -> DragContext {
    use_context::<DragContext>().expect("DragContext should be provided")
}
