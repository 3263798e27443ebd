//! Status Banner Component
//!
//! Error/info strip with Retry for failed commits, plus a saving
//! indicator while commits are in flight.

use leptos::prelude::*;

use crate::commands;
use crate::context::use_app_context;
use crate::store::{store_clear_banner, use_ui_store, UiStateStoreFields};

#[component]
pub fn StatusBanner() -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();

    let pending = Memo::new(move |_| ui.session().with(|s| s.pending_count()));

    view! {
        <div class="status-strip">
            <Show when=move || { pending.get() > 0 }>
                <span class="saving-indicator">{move || format!("Saving… ({})", pending.get())}</span>
            </Show>
            {move || ui.banner().get().map(|banner| {
                let can_retry = banner.retry.is_some();
                view! {
                    <div class=if can_retry { "banner error" } else { "banner" } role="alert">
                        <span class="banner-message">{banner.message}</span>
                        {can_retry.then(|| view! {
                            <button class="banner-btn" on:click=move |_| commands::retry(ctx, ui)>
                                "Retry"
                            </button>
                        })}
                        <button class="banner-btn" title="Dismiss" on:click=move |_| store_clear_banner(&ui)>
                            "✕"
                        </button>
                    </div>
                }
            })}
        </div>
    }
}
