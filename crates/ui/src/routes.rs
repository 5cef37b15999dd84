use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{DashboardView, LandingView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LandingView)] Landing {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/quiz", QuizView)] Quiz {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopNav {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopNav() -> Element {
    rsx! {
        nav { class: "topbar",
            div { class: "brand",
                Link { to: Route::Landing {}, "Saphron Quore" }
            }
            ul {
                li { Link { to: Route::Landing {}, "Home" } }
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Quiz {}, "Quiz" } }
            }
        }
    }
}
