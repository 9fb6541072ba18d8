use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::context::AppContext;
use crate::views::{LoginView, QuizView, ToastStack, TopicsView, run_focus_bridge, use_toast_provider};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", TopicsView)] Topics {},
        #[route("/login", LoginView)] Login {},
        #[route("/quiz/:quiz_id", QuizView)] Quiz { quiz_id: String },
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    use_toast_provider();
    use_hook(move || {
        spawn(run_focus_bridge(ctx.focus_hub()));
    });

    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Quiz" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
            ToastStack {}
        }
    }
}
