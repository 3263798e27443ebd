//! Quiz Page Component
//!
//! One multiple-choice question at a time from the AI service, with a
//! running score. A new batch is fetched when the current one runs out.

use leptos::prelude::*;
use leptos::task::spawn_local;
use recipe_core::Quiz;

use crate::commands;
use crate::context::use_app_context;

fn answer_class(submitted: bool, selected: bool, correct: bool) -> &'static str {
    match (submitted, selected, correct) {
        (true, _, true) => "quiz-answer correct",
        (true, true, false) => "quiz-answer wrong",
        (false, true, _) => "quiz-answer selected",
        _ => "quiz-answer",
    }
}

#[component]
pub fn QuizPage() -> impl IntoView {
    let ctx = use_app_context();
    let (quiz, set_quiz) = signal(Quiz::default());
    let (loading, set_loading) = signal(false);
    let (error_text, set_error_text) = signal(None::<String>);

    let fetch = move || {
        let Some(client) = ctx.generation() else {
            set_error_text.set(Some("AI service is not configured".to_string()));
            return;
        };
        let request = quiz.with_untracked(Quiz::next_request);
        set_loading.set(true);
        set_error_text.set(None);
        spawn_local(async move {
            match commands::fetch_quiz(client, request).await {
                Ok(batch) => set_quiz.update(|q| q.load(batch)),
                Err(e) => set_error_text.set(Some(e)),
            }
            set_loading.set(false);
        });
    };
    fetch();

    let reset = move |_| {
        set_quiz.update(Quiz::reset);
        fetch();
    };
    let send = move |_| {
        set_quiz.update(|q| {
            q.submit();
        });
    };
    let next = move |_| {
        let mut batch_done = false;
        set_quiz.update(|q| batch_done = q.advance());
        if batch_done {
            fetch();
        }
    };

    let body = move || {
        if loading.get() {
            return view! { <p class="loading">"Loading questions…"</p> }.into_any();
        }
        if let Some(e) = error_text.get() {
            return view! { <p class="form-error">{e}</p> }.into_any();
        }
        let Some(question) = quiz.with(|q| q.question().cloned()) else {
            return view! { <p class="empty-hint">"No questions yet"</p> }.into_any();
        };
        let (submitted, selected) = quiz.with(|q| (q.is_submitted(), q.selected()));

        let answers = question
            .answers
            .iter()
            .enumerate()
            .map(|(index, answer)| {
                let letter = char::from(b'A' + (index % 26) as u8);
                let class = answer_class(submitted, selected == Some(index), answer.correct);
                view! {
                    <button
                        class=class
                        disabled=submitted
                        on:click=move |_| set_quiz.update(|q| q.select(index))
                    >
                        {format!("{}. {}", letter, answer.text)}
                    </button>
                }
            })
            .collect_view();

        let verdict = selected.map(|index| question.is_correct(index));

        view! {
            <h2 class="quiz-question">{question.q.clone()}</h2>
            <div class="quiz-answers">{answers}</div>
            {if submitted {
                view! {
                    <div class="quiz-result">
                        <p class=if verdict == Some(true) { "verdict right" } else { "verdict wrong" }>
                            {if verdict == Some(true) { "Correct!" } else { "Not quite." }}
                        </p>
                        <p class="quiz-explanation">{question.explanation.clone()}</p>
                        <button on:click=next>"Next"</button>
                    </div>
                }
                .into_any()
            } else {
                view! {
                    <button class="quiz-send" disabled=selected.is_none() on:click=send>
                        "Send"
                    </button>
                }
                .into_any()
            }}
        }
        .into_any()
    };

    view! {
        <section class="tool-page quiz-page">
            <header class="quiz-header">
                <span class="quiz-position">{move || format!("Question {}", quiz.with(Quiz::position))}</span>
                <span class="quiz-score">
                    {move || {
                        let (correct, answered, percent) = quiz.with(Quiz::score);
                        format!("{}/{} ({}%)", correct, answered, percent)
                    }}
                </span>
                <button class="quiz-reset" on:click=reset>"Reset"</button>
            </header>
            {body}
        </section>
    }
}
