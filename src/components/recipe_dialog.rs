//! Recipe Dialog Component
//!
//! Overlay for the selected recipe: read view, edit form, and the add
//! form for `/recipes/{category}/add`. The add/edit form can ask the AI
//! service to fill in a recipe from its title.

use leptos::prelude::*;
use leptos::task::spawn_local;
use recipe_core::navigation::Selection;
use recipe_core::{Commit, FlightKey, Ingredients, Intent, Recipe, RecipeDraft};

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::markdown::render_steps;
use crate::store::{store_is_busy, use_ui_store, UiStateStoreFields};

/// Add or edit form. `existing` = None means a new recipe in `category_id`.
#[component]
fn RecipeForm(
    category_id: String,
    existing: Option<Recipe>,
    #[prop(into)] on_done: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();

    let draft = existing.as_ref().map(Recipe::to_draft).unwrap_or_default();
    let keep_list = existing.is_none() || matches!(draft.ingredients, Ingredients::List(_));
    let recipe_id = existing.map(|r| r.id);

    let (title, set_title) = signal(draft.title.clone());
    let (ingredients, set_ingredients) = signal(draft.ingredients.to_text());
    let (steps, set_steps) = signal(draft.preparation_steps.clone());
    let (image_url, set_image_url) = signal(draft.image_url.clone().unwrap_or_default());
    let (minutes, set_minutes) = signal(
        draft
            .prepare_time_minutes
            .map(|m| m.to_string())
            .unwrap_or_default(),
    );
    let (error_text, set_error_text) = signal(None::<String>);
    let (generating, set_generating) = signal(false);
    let saving = {
        let key = FlightKey::recipe_form(&category_id, recipe_id.as_deref());
        Memo::new(move |_| store_is_busy(&ui, &key))
    };

    let collect_draft = move || {
        let text = ingredients.get_untracked();
        let ingredients = if keep_list {
            Ingredients::List(
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        } else {
            Ingredients::Text(text)
        };
        let image = image_url.get_untracked();
        RecipeDraft {
            title: title.get_untracked(),
            ingredients,
            preparation_steps: steps.get_untracked(),
            image_url: (!image.trim().is_empty()).then_some(image),
            prepare_time_minutes: minutes.get_untracked().trim().parse().ok(),
        }
    };

    let submit = {
        let category_id = category_id.clone();
        let recipe_id = recipe_id.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if saving.get_untracked() {
                return;
            }
            let draft = collect_draft();
            if let Err(e) = draft.validate() {
                set_error_text.set(Some(e.to_string()));
                return;
            }
            set_error_text.set(None);
            match &recipe_id {
                Some(recipe_id) => {
                    commands::dispatch(
                        ctx,
                        ui,
                        Intent::UpdateRecipe {
                            recipe_id: recipe_id.clone(),
                            draft,
                        },
                    );
                    on_done.run(());
                }
                None => {
                    let commit = commands::dispatch(
                        ctx,
                        ui,
                        Intent::AddRecipe {
                            category_id: category_id.clone(),
                            draft,
                        },
                    );
                    if let Some(Commit::AddRecipe { provisional_id, .. }) = commit {
                        commands::select_recipe(ui, &provisional_id);
                    }
                }
            }
        }
    };

    let fill_with_ai = {
        let category_id = category_id.clone();
        move |_| {
            let Some(client) = ctx.generation() else {
                return;
            };
            let wanted = title.get_untracked();
            if wanted.trim().is_empty() {
                set_error_text.set(Some("Type a title first".to_string()));
                return;
            }
            let category = ui
                .session()
                .with_untracked(|s| s.catalog().category(&category_id).map(|c| c.name.clone()));
            let lang = ui.preferences().with_untracked(|p| p.language.clone());
            set_generating.set(true);
            set_error_text.set(None);
            spawn_local(async move {
                match commands::fill_recipe(client, wanted, category, lang).await {
                    Ok(filled) => {
                        set_title.set(filled.title);
                        set_ingredients.set(filled.ingredients.to_text());
                        set_steps.set(filled.preparation_steps);
                        if let Some(url) = filled.image_url {
                            set_image_url.set(url);
                        }
                    }
                    Err(e) => set_error_text.set(Some(e)),
                }
                set_generating.set(false);
            });
        }
    };

    let generate_picture = move |_| {
        let Some(client) = ctx.generation() else {
            return;
        };
        let text = title.get_untracked();
        set_generating.set(true);
        spawn_local(async move {
            match commands::generate_image(client, text).await {
                Ok(url) => set_image_url.set(url),
                Err(e) => set_error_text.set(Some(e)),
            }
            set_generating.set(false);
        });
    };

    let has_ai = ctx.has_generation();

    view! {
        <form class="recipe-form" on:submit=submit>
            <label>
                "Title"
                <input
                    type="text"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Ingredients (one per line)"
                <textarea
                    rows="6"
                    prop:value=move || ingredients.get()
                    on:input=move |ev| set_ingredients.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Preparation"
                <textarea
                    rows="8"
                    prop:value=move || steps.get()
                    on:input=move |ev| set_steps.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Image URL"
                <input
                    type="url"
                    prop:value=move || image_url.get()
                    on:input=move |ev| set_image_url.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Minutes"
                <input
                    type="number"
                    min="0"
                    prop:value=move || minutes.get()
                    on:input=move |ev| set_minutes.set(event_target_value(&ev))
                />
            </label>

            {move || error_text.get().map(|e| view! { <p class="form-error">{e}</p> })}

            <div class="form-actions">
                {has_ai.then(|| view! {
                    <button type="button" disabled=move || generating.get() on:click=fill_with_ai>
                        {move || if generating.get() { "Generating..." } else { "✨ Fill with AI" }}
                    </button>
                    <button type="button" disabled=move || generating.get() on:click=generate_picture>
                        "🖼 Picture"
                    </button>
                })}
                <button type="button" class="cancel-btn" on:click=move |_| on_done.run(())>
                    "Cancel"
                </button>
                <button type="submit" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving…" } else { "Save" }}
                </button>
            </div>
        </form>
    }
}

/// Read view with edit and delete actions
#[component]
fn RecipeView(recipe_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();
    let (editing, set_editing) = signal(false);

    let found = {
        let recipe_id = recipe_id.clone();
        Memo::new(move |_| {
            ui.session().with(|s| {
                s.catalog()
                    .find_recipe(&recipe_id)
                    .map(|(c, r)| (c.id.clone(), r.clone()))
            })
        })
    };
    let saving = {
        let key = FlightKey::Recipe(recipe_id.clone());
        Memo::new(move |_| store_is_busy(&ui, &key))
    };
    let delete = Callback::new(move |_| {
        commands::dispatch(ctx, ui, Intent::DeleteRecipe { recipe_id: recipe_id.clone() });
    });

    move || {
        let Some((category_id, recipe)) = found.get() else {
            return ().into_any();
        };
        if editing.get() {
            return view! {
                <RecipeForm
                    category_id=category_id
                    existing=Some(recipe)
                    on_done=move |_| set_editing.set(false)
                />
            }
            .into_any();
        }

        let ingredients: Vec<String> = recipe
            .ingredients
            .lines()
            .into_iter()
            .map(str::to_string)
            .collect();
        let steps_html = render_steps(&recipe.preparation_steps);

        view! {
            <article class="recipe-view">
                <h2>{recipe.title.clone()}</h2>
                {recipe.image().map(|src| view! {
                    <img class="recipe-image" src=src.to_string() alt=recipe.title.clone() />
                })}
                {recipe.prepare_time_minutes.map(|m| view! {
                    <p class="recipe-time">{format!("⏱ {} min", m)}</p>
                })}
                <h3>"Ingredients"</h3>
                <ul class="ingredients">
                    {ingredients.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
                <h3>"Preparation"</h3>
                <div class="steps" inner_html=steps_html></div>
                <div class="form-actions">
                    <button disabled=move || saving.get() on:click=move |_| set_editing.set(true)>
                        "Edit"
                    </button>
                    <DeleteConfirmButton
                        button_class="delete-btn"
                        disabled=saving
                        on_confirm=delete
                    />
                </div>
            </article>
        }
        .into_any()
    }
}

/// Overlay shown while a recipe or the add form is selected
#[component]
pub fn RecipeDialog() -> impl IntoView {
    let ui = use_ui_store();
    let selection = Memo::new(move |_| ui.navigator().with(|n| n.selection().clone()));
    let close = move |_| commands::close_recipe(ui);

    move || {
        let body = match selection.get() {
            Selection::Recipe { recipe_id, .. } => view! { <RecipeView recipe_id=recipe_id /> }.into_any(),
            Selection::Adding { category_id } => view! {
                <h2>"New recipe"</h2>
                <RecipeForm
                    category_id=category_id
                    existing=None
                    on_done=move |_| commands::close_recipe(ui)
                />
            }
            .into_any(),
            _ => return None,
        };
        Some(view! {
            <div class="dialog-backdrop" on:click=close>
                <div class="dialog" on:click=|ev| ev.stop_propagation()>
                    <button class="dialog-close" on:click=close>"×"</button>
                    {body}
                </div>
            </div>
        })
    }
}
