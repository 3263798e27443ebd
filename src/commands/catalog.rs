//! Catalog Commands
//!
//! Load the catalog and dispatch intents: apply locally first, commit to
//! the store in the background, then confirm or revert.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use recipe_core::repository::execute;
use recipe_core::{Commit, CommitOutcome, DomainError, Intent, SystemProvisioner};
use tracing::{info, warn};

use super::navigation::{follow_path, sync_navigation};
use crate::context::AppContext;
use crate::routing;
use crate::store::{
    store_clear_banner, store_show_error, LoadState, UiStateStoreFields, UiStore,
};

/// How long informational banners stay up
const FLASH_MS: u32 = 4_000;

/// Load the whole catalog, then resolve the current path against it
pub fn load_catalog(ctx: AppContext, ui: UiStore) {
    ui.load().set(LoadState::Loading);
    let backend = ctx.store();
    spawn_local(async move {
        match backend.load().await {
            Ok(catalog) => {
                info!(
                    categories = catalog.categories.len(),
                    recipes = catalog.recipe_count(),
                    "[APP] catalog loaded"
                );
                ui.session().write().replace_catalog(catalog);
                ui.load().set(LoadState::Ready);
                follow_path(ctx, ui, routing::current_path());
            }
            Err(e) => {
                let err = DomainError::StoreUnavailable(e.to_string());
                warn!(error = %err, "[APP] catalog load failed");
                // keep whatever is already on screen
                if ui.session().with_untracked(|s| s.catalog().is_empty()) {
                    ui.load().set(LoadState::Failed(err.to_string()));
                } else {
                    store_show_error(&ui, &err);
                }
            }
        }
    });
}

/// Apply `intent` optimistically and commit it in the background.
///
/// Returns the commit when something changed, so callers can follow a
/// provisional id (e.g. open the recipe just added).
pub fn dispatch(ctx: AppContext, ui: UiStore, intent: Intent) -> Option<Commit> {
    let begun = ui
        .session()
        .write()
        .begin(intent, &mut SystemProvisioner);
    let pending = match begun {
        Ok(Some(pending)) => pending,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "[APP] intent rejected");
            store_show_error(&ui, &e);
            return None;
        }
    };

    let commit = pending.commit.clone();
    sync_navigation(ui);

    let backend = ctx.store();
    spawn_local(async move {
        let result = execute(&*backend, &pending.commit).await;
        let settled = ui.session().write().finish(pending, result);
        match settled {
            Ok(CommitOutcome::Applied) => {}
            Ok(outcome) => info!(?outcome, "[APP] store assigned canonical id"),
            Err(e) => store_show_error(&ui, &e),
        }
        sync_navigation(ui);
    });

    Some(commit)
}

/// Re-dispatch the intent attached to the current banner
pub fn retry(ctx: AppContext, ui: UiStore) {
    let intent = ui
        .banner()
        .with_untracked(|banner| banner.as_ref().and_then(|b| b.retry.clone()));
    store_clear_banner(&ui);
    if let Some(intent) = intent {
        info!(?intent, "[APP] retrying");
        dispatch(ctx, ui, intent);
    }
}

/// Show a message that clears itself
pub fn flash(ui: UiStore, message: String) {
    crate::store::store_show_info(&ui, message.clone());
    spawn_local(async move {
        TimeoutFuture::new(FLASH_MS).await;
        let still_shown = ui
            .banner()
            .with_untracked(|b| b.as_ref().is_some_and(|b| b.message == message));
        if still_shown {
            store_clear_banner(&ui);
        }
    });
}
