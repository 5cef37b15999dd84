use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardVm, map_dashboard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClearState {
    Idle,
    Clearing,
    Error(ViewError),
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboard = ctx.dashboard();
    let mut clear_state = use_signal(|| ClearState::Idle);

    let dashboard_for_resource = dashboard.clone();
    let resource = use_resource(move || {
        let dashboard = dashboard_for_resource.clone();
        async move {
            let summary = dashboard.load().await.map_err(|err| ViewError::from(&err))?;
            Ok::<_, ViewError>(map_dashboard(&summary))
        }
    });

    let on_clear = move |_| {
        let dashboard = dashboard.clone();
        let mut resource = resource;
        clear_state.set(ClearState::Clearing);
        spawn(async move {
            match dashboard.clear_activity().await {
                Ok(()) => {
                    clear_state.set(ClearState::Idle);
                    resource.restart();
                }
                Err(err) => clear_state.set(ClearState::Error(ViewError::from(&err))),
            }
        });
    };

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page dashboard-page",
            header { class: "view-header",
                h2 { class: "view-title", "Dashboard" }
                p { class: "view-subtitle", "Track your learning progress, mastery, and recent activity." }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(vm) => rsx! {
                    DashboardCards {
                        vm,
                        clearing: clear_state() == ClearState::Clearing,
                        on_clear,
                    }
                    if let ClearState::Error(err) = clear_state() {
                        p { class: "error", "{err.message()}" }
                    }
                },
            }
        }
    }
}

#[component]
fn DashboardCards(vm: DashboardVm, clearing: bool, on_clear: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div { class: "dashboard-grid",
            section { class: "card",
                h3 { "Progress" }
                p { class: "muted", "See your overall mastery" }
                div { class: "mastery", "{vm.mastery_label}" }
                p { class: "muted", "{vm.mastery_caption}" }
                for row in vm.topic_rows.iter() {
                    div { class: "bar", key: "{row.label}",
                        span { "{row.label}" }
                        div { class: "bar-track",
                            div { class: "bar-fill", style: row.width_style() }
                        }
                        span { class: "muted", "{row.percent}" }
                    }
                }
            }
            section { class: "card",
                h3 { "Recent Activity" }
                p { class: "muted", "Latest quiz answers" }
                if vm.has_activity() {
                    ul {
                        for (idx, row) in vm.activity_rows.iter().enumerate() {
                            li { key: "{idx}",
                                div { "{row.question}" }
                                div { "{row.answer}" }
                                div { class: row.verdict_class, "{row.verdict}" }
                                div { class: "muted", "{row.time}" }
                            }
                        }
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: clearing,
                        onclick: move |evt| on_clear.call(evt),
                        if clearing { "Clearing..." } else { "Clear history" }
                    }
                } else {
                    p { class: "muted", "No recent activity yet." }
                }
            }
            section { class: "card",
                h3 { "Profile" }
                p { class: "muted", "Your learning profile" }
                p { "Total Questions Answered: {vm.total_answered}" }
                p { "Accuracy: {vm.accuracy_label}" }
                p { "Mastery by Topic:" }
                ul {
                    for row in vm.topic_rows.iter() {
                        li { key: "{row.label}", "{row.label}: {row.percent}" }
                    }
                }
            }
        }
    }
}
