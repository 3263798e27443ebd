//! Category List Component
//!
//! Sidebar of categories in display order with an add input. In edit mode
//! rows can be dragged to reorder and deleted.

use leptos::prelude::*;
use leptos_dragdrop::*;
use recipe_core::{Category, Commit, FlightKey, Intent};

use crate::commands;
use crate::components::{DeleteConfirmButton, DropZone, DropZoneProps};
use crate::context::{use_app_context, use_drag_context};
use crate::store::{store_is_busy, use_ui_store, UiStateStoreFields};

/// Category add input
#[component]
fn CategoryAddInput() -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();

    let (new_name, set_new_name) = signal(String::new());
    let busy = Memo::new(move |_| store_is_busy(&ui, &FlightKey::NewCategory));

    let add_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        if name.trim().is_empty() {
            return;
        }
        if let Some(Commit::AddCategory { provisional_id, .. }) =
            commands::dispatch(ctx, ui, Intent::AddCategory { name })
        {
            set_new_name.set(String::new());
            commands::select_category(ui, &provisional_id);
        }
    };

    view! {
        <form class="category-add-form" on:submit=add_category>
            <input
                type="text"
                placeholder="New category..."
                prop:value=move || new_name.get()
                on:input=move |ev| set_new_name.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || busy.get()>"+"</button>
        </form>
    }
}

#[component]
fn CategoryRow(index: usize, category: Category, selected: Memo<Option<String>>) -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();
    let dnd = use_drag_context().categories;

    let id = category.id.clone();
    let is_selected = {
        let id = id.clone();
        move || selected.with(|s| s.as_deref() == Some(id.as_str()))
    };
    let busy_key = FlightKey::Category(id.clone());
    let saving = Memo::new(move |_| store_is_busy(&ui, &busy_key));

    let on_mousedown = make_on_mousedown(dnd, index);
    let on_mouseenter = make_on_mouseenter(dnd, DropTarget::Item(index));
    let on_mouseleave = make_on_mouseleave(dnd);

    let row_class = move || {
        let mut c = String::from("category-row");
        if is_selected() { c.push_str(" selected"); }
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
            commands::select_category(ui, &id);
        }
    };

    let delete = {
        let id = id.clone();
        Callback::new(move |_| {
            commands::dispatch(ctx, ui, Intent::DeleteCategory { id: id.clone() });
        })
    };

    view! {
        <div
            class=row_class
            on:mousedown=move |ev| {
                if ui.edit_mode().get_untracked() {
                    on_mousedown(ev);
                }
            }
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
            on:click=on_click
        >
            {category.thumbnail().map(|src| view! {
                <img class="category-thumb" src=src.to_string() alt="" />
            })}
            <span class="category-name">{category.name.clone()}</span>
            <span class="category-count">{category.recipes.len()}</span>
            <Show when=move || ui.edit_mode().get()>
                <DeleteConfirmButton
                    button_class="delete-btn"
                    disabled=saving
                    on_confirm=delete
                />
            </Show>
        </div>
    }
}

/// Category sidebar
#[component]
pub fn CategoryList() -> impl IntoView {
    let ui = use_ui_store();
    let dnd = use_drag_context().categories;

    let categories = Memo::new(move |_| ui.session().with(|s| s.catalog().categories.clone()));
    let selected = Memo::new(move |_| {
        ui.navigator()
            .with(|n| n.selection().category_id().map(str::to_string))
    });

    view! {
        <nav class="category-list">
            <For
                each=move || categories.get().into_iter().enumerate()
                key=|(index, c)| {
                    (
                        c.id.clone(),
                        c.name.clone(),
                        *index,
                        c.recipes.len(),
                        c.thumbnail().map(str::to_string),
                    )
                }
                children=move |(index, category)| {
                    view! {
                        <DropZone dnd=dnd slot=index />
                        <CategoryRow index=index category=category selected=selected />
                    }
                }
            />
            {move || DropZone(DropZoneProps { dnd, slot: categories.with(Vec::len) })}

            <Show when=move || categories.with(Vec::is_empty)>
                <p class="empty-hint">"No categories yet"</p>
            </Show>

            <CategoryAddInput />
        </nav>
    }
}
