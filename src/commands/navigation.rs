//! Navigation Commands
//!
//! Move the selection and keep the address bar in step with it.

use leptos::prelude::*;
use recipe_core::navigation::{Page, Tool};
use tracing::debug;

use crate::context::AppContext;
use crate::routing;
use crate::store::{store_catalog, UiStateStoreFields, UiStore};

/// Resolve a path (initial load, back/forward) without pushing history
pub fn follow_path(ctx: AppContext, ui: UiStore, path: String) {
    let catalog = store_catalog(&ui);
    let selection = ui.navigator().write().navigate(&catalog, &path).clone();
    debug!(%path, ?selection, "[NAV] followed path");
    reveal_selected_recipe(ui, ctx.page_size());
}

/// After the catalog changed: rewrite the URL if the selection was
/// renamed or removed
pub fn sync_navigation(ui: UiStore) {
    let catalog = store_catalog(&ui);
    let replaced = ui.navigator().write().sync(&catalog);
    if let Some(path) = replaced {
        routing::replace_path(&path);
    }
}

fn push(path: Option<String>) {
    if let Some(path) = path {
        routing::push_path(&path);
    }
}

pub fn select_category(ui: UiStore, category_id: &str) {
    let catalog = store_catalog(&ui);
    let path = ui.navigator().write().select_category(&catalog, category_id);
    if path.is_some() {
        ui.page().set(1);
    }
    push(path);
}

pub fn select_recipe(ui: UiStore, recipe_id: &str) {
    let catalog = store_catalog(&ui);
    push(ui.navigator().write().select_recipe(&catalog, recipe_id));
}

pub fn start_adding(ui: UiStore, category_id: &str) {
    let catalog = store_catalog(&ui);
    push(ui.navigator().write().start_adding(&catalog, category_id));
}

pub fn close_recipe(ui: UiStore) {
    let catalog = store_catalog(&ui);
    push(ui.navigator().write().close_recipe(&catalog));
}

pub fn open_tool(ui: UiStore, tool: Tool) {
    let path = ui.navigator().write().open_tool(tool);
    routing::push_path(&path);
}

/// Page of the grid, clamped when rendered
pub fn set_page(ui: UiStore, page: usize) {
    ui.page().set(page.max(1));
}

/// Show the grid page holding the selected recipe
fn reveal_selected_recipe(ui: UiStore, page_size: usize) {
    let catalog = store_catalog(&ui);
    let index = ui.navigator().with_untracked(|nav| {
        let selection = nav.selection();
        let category = catalog.category(selection.category_id()?)?;
        let recipe_id = selection.recipe_id()?;
        category.recipes.iter().position(|r| r.id == recipe_id)
    });
    match index {
        Some(index) => ui.page().set(Page::containing(index, page_size)),
        None => ui.page().set(1),
    }
}
