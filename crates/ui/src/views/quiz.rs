use dioxus::prelude::*;
use services::{QuizSnapshot, QuizStatus};

use crate::context::AppContext;
use crate::vm::{QuizIntent, map_quiz};

/// Marks the snapshot as busy before the session claims the transition, so
/// the buttons disable on the same frame as the click.
fn mark_pending(mut snapshot: Signal<QuizSnapshot>, intent: QuizIntent) {
    snapshot.with_mut(|snap| match intent {
        QuizIntent::Load | QuizIntent::Next if snap.can_load() => {
            snap.status = QuizStatus::Loading;
        }
        QuizIntent::Submit if snap.can_submit() => snap.status = QuizStatus::Submitting,
        _ => {}
    });
}

fn log_ignored<E: std::fmt::Display>(result: Result<(), E>, intent: QuizIntent) {
    // Backend failures are already logged by the session and kept as `last_error`.
    if let Err(err) = result {
        tracing::debug!(error = %err, ?intent, "quiz action did not complete");
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_hook(|| ctx.new_quiz_session());
    let snapshot = use_signal(|| session.snapshot());

    let dispatch = {
        let session = session.clone();
        use_callback(move |intent: QuizIntent| {
            let mut snapshot = snapshot;
            if let QuizIntent::Select(index) = intent {
                log_ignored(session.select_answer(index), intent);
                snapshot.set(session.snapshot());
                return;
            }
            mark_pending(snapshot, intent);
            let session = session.clone();
            spawn(async move {
                let result = match intent {
                    QuizIntent::Load => session.load_question().await.map(|_| ()),
                    QuizIntent::Next => session.next_question().await.map(|_| ()),
                    QuizIntent::Submit => session.submit().await.map(|_| ()),
                    QuizIntent::Select(_) => Ok(()),
                };
                log_ignored(result, intent);
                snapshot.set(session.snapshot());
            });
        })
    };

    use_effect(move || dispatch.call(QuizIntent::Load));

    {
        let session = session.clone();
        use_drop(move || session.close());
    }

    let vm = map_quiz(&snapshot.read());

    rsx! {
        div { class: "page quiz-page",
            header { class: "view-header",
                h2 { class: "view-title", "Adaptive Learning System" }
            }
            div { class: "grid",
                section { class: "card",
                    if vm.loading {
                        p { "Loading your learning session..." }
                    }
                    if let Some(header) = vm.header.clone() {
                        div { class: "question-header",
                            h3 { "{header}" }
                            if let Some(badge) = vm.topic_badge.clone() {
                                span { class: "badge", "{badge}" }
                            }
                        }
                    }
                    if let Some(prompt) = vm.prompt.clone() {
                        p { class: "prompt", "{prompt}" }
                    }
                    for option in vm.options.clone() {
                        button {
                            key: "{option.index}",
                            class: option.class(),
                            r#type: "button",
                            disabled: option.disabled,
                            onclick: move |_| dispatch.call(QuizIntent::Select(option.index)),
                            "{option.label}"
                        }
                    }
                    if let Some(feedback) = vm.feedback.clone() {
                        div { class: feedback.class(), role: "status",
                            "{feedback.message}"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| dispatch.call(QuizIntent::Next),
                            "Next Question"
                        }
                    }
                    if vm.show_submit && vm.header.is_some() {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: vm.submit_disabled,
                            onclick: move |_| dispatch.call(QuizIntent::Submit),
                            "{vm.submit_label}"
                        }
                    }
                    if let Some(error) = vm.error.clone() {
                        p { class: "error", "{error}" }
                    }
                    if let Some(intent) = vm.retry {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| dispatch.call(intent),
                            "Retry"
                        }
                    }
                }
                aside { class: "card",
                    h3 { "Knowledge Progress" }
                    p { class: "muted", "Your mastery level across different topics" }
                    for bar in vm.knowledge_bars.clone() {
                        div { class: "bar", key: "{bar.label}",
                            span { "{bar.label}" }
                            div { class: "bar-track",
                                div { class: "bar-fill", style: bar.width_style() }
                            }
                            span { class: "muted", "{bar.percent}" }
                        }
                    }
                }
            }
        }
    }
}
