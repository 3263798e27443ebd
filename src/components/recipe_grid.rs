//! Recipe Grid Component
//!
//! Cards for the selected category, one page at a time. In edit mode cards
//! can be dragged within the page and deleted.

use leptos::prelude::*;
use leptos_dragdrop::*;
use recipe_core::navigation::Page;
use recipe_core::{FlightKey, Intent, Recipe};

use crate::commands;
use crate::components::{DeleteConfirmButton, DropZone, DropZoneProps};
use crate::context::{use_app_context, use_drag_context};
use crate::store::{store_is_busy, use_ui_store, UiStateStoreFields};

#[component]
fn RecipeCard(index: usize, recipe: Recipe) -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();
    let dnd = use_drag_context().recipes;

    let id = recipe.id.clone();
    let busy_key = FlightKey::Recipe(id.clone());
    let saving = Memo::new(move |_| store_is_busy(&ui, &busy_key));

    let on_mousedown = make_on_mousedown(dnd, index);
    let on_mouseenter = make_on_mouseenter(dnd, DropTarget::Item(index));
    let on_mouseleave = make_on_mouseleave(dnd);

    let card_class = move || {
        let mut c = String::from("recipe-card");
        if dnd.is_dragging(index) { c.push_str(" dragging"); }
        if dnd.is_target(DropTarget::Item(index)) { c.push_str(" drop-target"); }
        if saving.get() { c.push_str(" saving"); }
        c
    };

    let on_click = {
        let id = id.clone();
        move |_| {
            if dnd.drag_just_ended_read.get_untracked() {
                return;
            }
            commands::select_recipe(ui, &id);
        }
    };

    let delete = Callback::new(move |_| {
        commands::dispatch(ctx, ui, Intent::DeleteRecipe { recipe_id: id.clone() });
    });

    view! {
        <article
            class=card_class
            on:mousedown=move |ev| {
                if ui.edit_mode().get_untracked() {
                    on_mousedown(ev);
                }
            }
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
            on:click=on_click
        >
            {match recipe.image() {
                Some(src) => view! { <img class="recipe-card-image" src=src.to_string() alt="" /> }.into_any(),
                None => view! { <div class="recipe-card-image placeholder">"🍲"</div> }.into_any(),
            }}
            <h3 class="recipe-card-title">{recipe.title.clone()}</h3>
            {recipe.prepare_time_minutes.map(|m| view! {
                <span class="recipe-card-time">{format!("{} min", m)}</span>
            })}
            <Show when=move || ui.edit_mode().get()>
                <DeleteConfirmButton
                    button_class="delete-btn card-delete"
                    disabled=saving
                    on_confirm=delete
                />
            </Show>
        </article>
    }
}

#[component]
fn Pagination(page: Memo<Page>) -> impl IntoView {
    let ui = use_ui_store();

    view! {
        <Show when=move || page.with(|p| p.count > 1)>
            <div class="pagination">
                <button
                    disabled=move || !page.with(Page::has_prev)
                    on:click=move |_| commands::set_page(ui, page.get_untracked().number - 1)
                >
                    "‹"
                </button>
                <span class="page-number">
                    {move || page.with(|p| format!("{} / {}", p.number, p.count))}
                </span>
                <button
                    disabled=move || !page.with(Page::has_next)
                    on:click=move |_| commands::set_page(ui, page.get_untracked().number + 1)
                >
                    "›"
                </button>
            </div>
        </Show>
    }
}

/// Recipes of one category
#[component]
pub fn RecipeGrid(category_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();
    let dnd = use_drag_context().recipes;
    let page_size = ctx.page_size();

    let category = {
        let category_id = category_id.clone();
        Memo::new(move |_| {
            ui.session()
                .with(|s| s.catalog().category(&category_id).cloned())
        })
    };
    let page = Memo::new(move |_| {
        let total = category.with(|c| c.as_ref().map_or(0, |c| c.recipes.len()));
        Page::of(total, ui.page().get(), page_size)
    });
    let visible = move || {
        let range = page.get().range();
        category.with(|c| {
            c.as_ref()
                .and_then(|c| c.recipes.get(range))
                .unwrap_or_default()
                .iter()
                .cloned()
                .enumerate()
                .collect::<Vec<_>>()
        })
    };

    let adding_busy = {
        let key = FlightKey::NewRecipe(category_id.clone());
        Memo::new(move |_| store_is_busy(&ui, &key))
    };
    let start_adding = move |_| commands::start_adding(ui, &category_id);

    view! {
        <section class="recipe-grid-section">
            <header class="recipe-grid-header">
                <h2>{move || category.with(|c| c.as_ref().map(|c| c.name.clone()).unwrap_or_default())}</h2>
                <button class="add-recipe-btn" disabled=move || adding_busy.get() on:click=start_adding>
                    "+ Add recipe"
                </button>
            </header>

            <div class="recipe-grid">
                <For
                    each=visible
                    key=|(index, r)| {
                        (
                            r.id.clone(),
                            *index,
                            r.title.clone(),
                            r.image_url.clone(),
                            r.prepare_time_minutes,
                        )
                    }
                    children=move |(index, recipe)| {
                        view! {
                            <DropZone dnd=dnd slot=index />
                            <RecipeCard index=index recipe=recipe />
                        }
                    }
                />
                {move || {
                    let slot = page.with(|p| p.end - p.start);
                    DropZone(DropZoneProps { dnd, slot })
                }}
            </div>

            <Show when=move || page.with(|p| p.start == p.end)>
                <p class="empty-hint">"No recipes in this category yet"</p>
            </Show>

            <Pagination page=page />
        </section>
    }
}
