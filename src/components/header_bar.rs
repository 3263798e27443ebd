//! Header Bar Component
//!
//! Site title, tool links and the edit-mode, theme and language controls.

use leptos::prelude::*;
use recipe_core::navigation::Tool;
use recipe_core::preferences::LANGUAGES;
use recipe_core::Theme;

use crate::commands;
use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn HeaderBar() -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();

    let edit_mode = move || ui.edit_mode().get();
    let toggle_edit = move |_| ui.edit_mode().update(|on| *on = !*on);

    let theme = move || ui.preferences().with(|p| p.theme);
    let toggle_theme = move |_| {
        ui.preferences().update(|p| p.theme = p.theme.toggled());
    };

    let language = move || ui.preferences().with(|p| p.language.clone());
    let change_language = move |ev| {
        let code = event_target_value(&ev);
        ui.preferences().update(|p| *p = p.clone().with_language(&code));
    };

    let go_home = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let first = ui
            .session()
            .with_untracked(|s| s.catalog().first_category().map(|c| c.id.clone()));
        match first {
            Some(id) => commands::select_category(ui, &id),
            None => commands::close_recipe(ui),
        }
    };

    view! {
        <header class="header-bar">
            <a class="site-title" href="/" on:click=go_home>"🍲 Recipe Box"</a>
            {ctx.is_offline().then(|| view! {
                <span class="offline-badge" title="Changes are kept in this tab only">"offline"</span>
            })}
            <nav class="tool-links">
                {Tool::ALL
                    .iter()
                    .map(|&tool| view! {
                        <button class="header-btn" on:click=move |_| commands::open_tool(ui, tool)>
                            {tool.label()}
                        </button>
                    })
                    .collect_view()}
            </nav>
            <div class="header-controls">
                <button
                    class=move || if edit_mode() { "header-btn active" } else { "header-btn" }
                    title="Rearrange and delete"
                    on:click=toggle_edit
                >
                    {move || if edit_mode() { "Done" } else { "Edit" }}
                </button>
                <button class="header-btn" title="Toggle theme" on:click=toggle_theme>
                    {move || if matches!(theme(), Theme::Dark) { "☀" } else { "☾" }}
                </button>
                <select class="language-select" on:change=change_language prop:value=language>
                    {LANGUAGES
                        .iter()
                        .map(|(code, label)| view! { <option value=*code>{*label}</option> })
                        .collect_view()}
                </select>
            </div>
        </header>
    }
}
