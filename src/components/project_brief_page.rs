//! Project Brief Page
//!
//! Free text plus optional job details in, a titled project brief out.
//! Character limits are sent only when filled in.

use leptos::prelude::*;
use leptos::task::spawn_local;
use recipe_core::generation::{CharCountLimits, ProjectBrief, ProjectBriefRequest};
use recipe_core::preferences::LANGUAGES;

use crate::commands;
use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

fn optional(text: String) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn limit(text: String) -> Option<u32> {
    text.trim().parse().ok()
}

/// Labelled single-line input bound to a signal
#[component]
fn Field(label: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <label>
            {label}
            <input
                type="text"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn ProjectBriefPage() -> impl IntoView {
    let ctx = use_app_context();
    let ui = use_ui_store();

    let default_lang = ui.preferences().with_untracked(|p| {
        LANGUAGES
            .iter()
            .find(|(code, _)| *code == p.language)
            .map(|(_, label)| label.to_string())
            .unwrap_or_default()
    });

    let free_text = RwSignal::new(String::new());
    let lang = RwSignal::new(default_lang);
    let writing_style = RwSignal::new("Professional".to_string());
    let job_role = RwSignal::new(String::new());
    let job_type = RwSignal::new(String::new());
    let years_exp = RwSignal::new(String::new());
    let must_skills = RwSignal::new(String::new());
    let nice_skills = RwSignal::new(String::new());
    let title_limit = RwSignal::new("100".to_string());
    let description_limit = RwSignal::new("200".to_string());
    let requirements_limit = RwSignal::new("180".to_string());

    let brief = RwSignal::new(None::<ProjectBrief>);
    let loading = RwSignal::new(false);
    let error_text = RwSignal::new(None::<String>);

    let build_request = move || ProjectBriefRequest {
        free_text: free_text.get_untracked(),
        lang: optional(lang.get_untracked()),
        writing_style: optional(writing_style.get_untracked()),
        job_role: optional(job_role.get_untracked()),
        job_type: optional(job_type.get_untracked()),
        years_exp: optional(years_exp.get_untracked()),
        must_skills: optional(must_skills.get_untracked()),
        nice_skills: optional(nice_skills.get_untracked()),
        char_count_limits: Some(CharCountLimits {
            title: limit(title_limit.get_untracked()),
            description: limit(description_limit.get_untracked()),
            requirements: limit(requirements_limit.get_untracked()),
        }),
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if free_text.with_untracked(|t| t.trim().is_empty()) {
            error_text.set(Some("Describe the project first".to_string()));
            return;
        }
        let Some(client) = ctx.generation() else {
            error_text.set(Some("AI service is not configured".to_string()));
            return;
        };
        let request = build_request();
        loading.set(true);
        error_text.set(None);
        spawn_local(async move {
            match commands::project_brief(client, request).await {
                Ok(answer) => brief.set(Some(answer)),
                Err(e) => error_text.set(Some(e)),
            }
            loading.set(false);
        });
    };

    let result = move || {
        brief.get().map(|b| {
            let section = |heading: &'static str, text: Option<String>| {
                text.map(|text| view! { <h3>{heading}</h3> <p>{text}</p> })
            };
            view! {
                <article class="brief-result">
                    {section("Title", b.title)}
                    {section("Description", b.description)}
                    {section("Requirements", b.requirements)}
                    <dl>
                        {b.extra
                            .iter()
                            .map(|(key, value)| view! {
                                <dt>{key.clone()}</dt>
                                <dd>{value.to_string()}</dd>
                            })
                            .collect_view()}
                    </dl>
                </article>
            }
        })
    };

    view! {
        <section class="tool-page brief-page">
            <h2>"Project brief"</h2>
            <form class="tool-form" on:submit=submit>
                <label>
                    "Describe the project"
                    <textarea
                        rows="5"
                        prop:value=move || free_text.get()
                        on:input=move |ev| free_text.set(event_target_value(&ev))
                    />
                </label>
                <Field label="Language" value=lang />
                <Field label="Writing style" value=writing_style />
                <Field label="Job role" value=job_role />
                <Field label="Job type" value=job_type />
                <Field label="Years of experience" value=years_exp />
                <Field label="Must-have skills" value=must_skills />
                <Field label="Nice-to-have skills" value=nice_skills />
                <fieldset class="limits">
                    <legend>"Character limits"</legend>
                    <Field label="Title" value=title_limit />
                    <Field label="Description" value=description_limit />
                    <Field label="Requirements" value=requirements_limit />
                </fieldset>
                <div class="form-actions">
                    <button type="submit" disabled=move || loading.get()>
                        {move || if loading.get() { "Writing…" } else { "Write brief" }}
                    </button>
                </div>
            </form>
            {move || error_text.get().map(|e| view! { <p class="form-error">{e}</p> })}
            {result}
        </section>
    }
}
