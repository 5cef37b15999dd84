use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    rsx! {
        div { class: "page landing-page",
            section { class: "card",
                h2 { "Welcome to Saphron Quore" }
                p {
                    "Adaptive practice that picks each question from what you already know, "
                    "so every topic gets the attention it needs."
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        navigator.push(Route::Quiz {});
                    },
                    "Start Learning"
                }
                p { class: "muted", "Backend: {ctx.backend_label()}" }
            }
        }
    }
}
