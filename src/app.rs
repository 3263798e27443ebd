//! Recipe Box Frontend App
//!
//! Root component: context, global drag bindings, catalog load and the
//! sidebar + grid layout.

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, resolve_drop, DropTarget};
use reactive_stores::Store;
use recipe_core::navigation::Tool;
use recipe_core::{Intent, Page, Selection};
use rolling_logger::LogBuffer;
use tracing::debug;

use crate::commands;
use crate::components::{
    CategoryList, HeaderBar, LogPanel, ProjectBriefPage, QuizPage, RecipeDialog, RecipeGrid,
    SqlPage, StatusBanner,
};
use crate::context::{load_config, AppContext, DragContext};
use crate::routing;
use crate::store::{store_catalog, use_ui_store, LoadState, UiState, UiStateStoreFields, UiStore};

/// Category rows: indices are positions in the full list
fn bind_category_drops(ctx: AppContext, ui: UiStore, drag: DragContext) {
    bind_global_mouseup(drag.categories, move |from, target| {
        let len = ui.session().with_untracked(|s| s.catalog().categories.len());
        if let Some(to) = resolve_drop(from, target, len) {
            debug!(from, to, "[DND] category dropped");
            commands::dispatch(ctx, ui, Intent::ReorderCategories { from, to });
        }
    });
}

/// Recipe cards: indices are page-local, shifted by the page start
fn bind_recipe_drops(ctx: AppContext, ui: UiStore, drag: DragContext) {
    bind_global_mouseup(drag.recipes, move |from, target| {
        let Some(category_id) = ui
            .navigator()
            .with_untracked(|n| n.selection().category_id().map(str::to_string))
        else {
            return;
        };
        let catalog = store_catalog(&ui);
        let Some(category) = catalog.category(&category_id) else {
            return;
        };
        let len = category.recipes.len();
        let start = Page::of(len, ui.page().get_untracked(), ctx.page_size()).start;
        if let Some(to) = resolve_drop(from + start, target.offset(start), len) {
            debug!(%category_id, from = from + start, to, "[DND] recipe dropped");
            commands::dispatch(
                ctx,
                ui,
                Intent::ReorderRecipes {
                    category_id,
                    from: from + start,
                    to,
                },
            );
        }
    });
}

/// Grid for the selected category, or the empty/not-found states
#[component]
fn SelectionView() -> impl IntoView {
    let ui = use_ui_store();
    let missing = Memo::new(move |_| {
        ui.navigator().with(|n| match n.selection() {
            Selection::NotFound(missing) => Some(missing.clone()),
            _ => None,
        })
    });
    let category_id = Memo::new(move |_| {
        ui.navigator()
            .with(|n| n.selection().category_id().map(str::to_string))
    });

    let go_home = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let catalog = store_catalog(&ui);
        if let Some(first) = catalog.first_category() {
            commands::select_category(ui, &first.id);
        }
    };

    move || {
        if let Some(missing) = missing.get() {
            return view! {
                <div class="not-found">
                    <h2>"Not found"</h2>
                    <p>{missing.to_string()}</p>
                    <a href="/" on:click=go_home>"Back to recipes"</a>
                </div>
            }
            .into_any();
        }
        match category_id.get() {
            Some(id) => view! {
                <RecipeGrid category_id=id />
                <RecipeDialog />
            }
            .into_any(),
            None => view! {
                <div class="empty-state">
                    <p>"Create a category to start collecting recipes"</p>
                </div>
            }
            .into_any(),
        }
    }
}

#[component]
pub fn App(logs: LogBuffer) -> impl IntoView {
    let ctx = AppContext::new(load_config(), logs);
    provide_context(ctx);

    let ui: UiStore = Store::new(UiState {
        preferences: commands::load_preferences(),
        page: 1,
        ..Default::default()
    });
    provide_context(ui);

    // created here so the document listeners outlive every list re-render
    let drag = DragContext {
        categories: create_dnd_signals(),
        recipes: create_dnd_signals(),
    };
    provide_context(drag);
    bind_category_drops(ctx, ui, drag);
    bind_recipe_drops(ctx, ui, drag);

    Effect::new(move |_| {
        let prefs = ui.preferences().get();
        commands::apply_preferences(&prefs);
        commands::save_preferences(&prefs);
    });

    // tool pages render before the catalog arrives
    commands::follow_path(ctx, ui, routing::current_path());
    commands::load_catalog(ctx, ui);
    routing::bind_popstate(move |path| commands::follow_path(ctx, ui, path));
    if ctx.is_offline() {
        commands::flash(ui, "Working offline: changes stay in this tab".to_string());
    }

    let reload = move |_| commands::load_catalog(ctx, ui);
    let tool = Memo::new(move |_| {
        ui.navigator().with(|n| match n.selection() {
            Selection::Tool(tool) => Some(*tool),
            _ => None,
        })
    });

    let catalog_view = move || match ui.load().get() {
        LoadState::Loading => view! { <p class="loading">"Loading recipes…"</p> }.into_any(),
        LoadState::Failed(message) => view! {
            <div class="load-failed">
                <p>{message}</p>
                <button on:click=reload>"Try again"</button>
            </div>
        }
        .into_any(),
        LoadState::Ready => view! {
            <div class="catalog-layout">
                <aside class="sidebar">
                    <CategoryList />
                </aside>
                <main class="main-content">
                    <SelectionView />
                </main>
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="app-layout">
            <HeaderBar />
            <StatusBanner />
            {move || match tool.get() {
                Some(Tool::Quiz) => view! { <main class="main-content"><QuizPage /></main> }.into_any(),
                Some(Tool::Sql) => view! { <main class="main-content"><SqlPage /></main> }.into_any(),
                Some(Tool::ProjectBrief) => {
                    view! { <main class="main-content"><ProjectBriefPage /></main> }.into_any()
                }
                None => catalog_view.into_any(),
            }}
            <LogPanel />
        </div>
    }
}
