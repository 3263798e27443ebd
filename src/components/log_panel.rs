//! Log Panel Component
//!
//! Collapsible view of the most recent log lines.

use leptos::prelude::*;

use rolling_logger::LogBuffer;

use crate::context::use_app_context;

#[component]
pub fn LogPanel() -> impl IntoView {
    let ctx = use_app_context();
    let (lines, set_lines) = signal(Vec::<String>::new());

    let refresh = move || set_lines.set(ctx.logs.with_value(LogBuffer::recent));

    view! {
        <details class="log-panel" on:toggle=move |_| refresh()>
            <summary>"Activity log"</summary>
            <div class="log-actions">
                <button on:click=move |_| refresh()>"Refresh"</button>
                <button on:click=move |_| {
                    ctx.logs.with_value(LogBuffer::clear);
                    refresh();
                }>"Clear"</button>
            </div>
            <pre class="log-lines">
                {move || lines.get().join("\n")}
            </pre>
        </details>
    }
}
