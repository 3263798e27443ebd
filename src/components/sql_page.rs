//! SQL Helper Page
//!
//! Free-text question in, SQL out, with a history of this visit's queries.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;

#[derive(Clone, Debug, PartialEq)]
struct SqlEntry {
    question: String,
    sql: String,
}

#[component]
pub fn SqlPage() -> impl IntoView {
    let ctx = use_app_context();
    let (question, set_question) = signal(String::new());
    let (sql, set_sql) = signal(String::new());
    let (history, set_history) = signal(Vec::<SqlEntry>::new());
    let (loading, set_loading) = signal(false);
    let (error_text, set_error_text) = signal(None::<String>);

    let convert = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let asked = question.get_untracked().trim().to_string();
        if asked.is_empty() {
            return;
        }
        let Some(client) = ctx.generation() else {
            set_error_text.set(Some("AI service is not configured".to_string()));
            return;
        };
        set_loading.set(true);
        set_error_text.set(None);
        spawn_local(async move {
            match commands::free_text_sql(client, asked.clone()).await {
                Ok(query) => {
                    set_sql.set(query.clone());
                    set_history.update(|h| h.push(SqlEntry { question: asked, sql: query }));
                }
                Err(e) => set_error_text.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    let clear = move |_| {
        set_question.set(String::new());
        set_sql.set(String::new());
        set_error_text.set(None);
    };

    view! {
        <section class="tool-page sql-page">
            <h2>"SQL helper"</h2>
            <form class="tool-form" on:submit=convert>
                <textarea
                    rows="4"
                    placeholder="e.g. customers who ordered more than twice last month"
                    prop:value=move || question.get()
                    on:input=move |ev| set_question.set(event_target_value(&ev))
                />
                <div class="form-actions">
                    <button type="button" on:click=clear>"Clear"</button>
                    <button type="submit" disabled=move || loading.get()>
                        {move || if loading.get() { "Converting…" } else { "Convert to SQL" }}
                    </button>
                </div>
            </form>

            {move || error_text.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <Show when=move || !sql.with(String::is_empty)>
                <pre class="sql-output">{move || sql.get()}</pre>
            </Show>

            <Show when=move || !history.with(Vec::is_empty)>
                <details class="sql-history">
                    <summary>{move || format!("History ({})", history.with(Vec::len))}</summary>
                    <ul>
                        {move || {
                            history
                                .get()
                                .into_iter()
                                .rev()
                                .map(|entry| view! {
                                    <li>
                                        <p class="sql-question">{entry.question}</p>
                                        <pre>{entry.sql}</pre>
                                    </li>
                                })
                                .collect_view()
                        }}
                    </ul>
                    <button on:click=move |_| set_history.set(Vec::new())>"Clear history"</button>
                </details>
            </Show>
        </section>
    }
}
