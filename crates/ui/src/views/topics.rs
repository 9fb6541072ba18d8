use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::QuizSummary;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::format_timer;

#[derive(Clone, Debug, PartialEq)]
struct TopicsData {
    username: Option<String>,
    quizzes: Vec<QuizSummary>,
}

#[component]
pub fn TopicsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    {
        let ctx = ctx.clone();
        use_effect(move || {
            if let Some(quiz_id) = ctx.take_initial_quiz() {
                navigator.push(Route::Quiz {
                    quiz_id: quiz_id.to_string(),
                });
            }
        });
    }

    let resource = {
        let ctx = ctx.clone();
        use_resource(move || {
            let auth = ctx.auth();
            let catalog = ctx.catalog();
            async move {
                let username = auth
                    .current()
                    .await
                    .map_err(|_| ViewError::Unknown)?
                    .map(|credentials| credentials.user().username.clone());
                let quizzes = catalog.list_quizzes().await.map_err(|err| {
                    tracing::warn!("could not list quizzes: {err}");
                    ViewError::Network
                })?;
                Ok::<_, ViewError>(TopicsData { username, quizzes })
            }
        })
    };
    let state = view_state_from_resource(resource);

    let logout = use_callback(move |()| {
        let auth = ctx.auth();
        spawn(async move {
            if let Err(err) = auth.logout().await {
                tracing::warn!("logout failed: {err}");
            }
            navigator.replace(Route::Login {});
        });
    });

    rsx! {
        div { class: "page topics",
            h2 { "Topics" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading quizzes..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { to: Route::Login {}, "Sign in" }
                },
                ViewState::Ready(TopicsData { username, quizzes }) => rsx! {
                    div { class: "account",
                        match username {
                            Some(name) => rsx! {
                                span { "Signed in as {name}" }
                                button {
                                    r#type: "button",
                                    onclick: move |_| logout.call(()),
                                    "Log out"
                                }
                            },
                            None => rsx! {
                                Link { to: Route::Login {}, "Sign in" }
                            },
                        }
                    }
                    if quizzes.is_empty() {
                        p { "No quizzes available yet." }
                    }
                    ul { class: "quiz-list",
                        for quiz in quizzes {
                            QuizListItem { key: "{quiz.id}", quiz: quiz.clone() }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn QuizListItem(quiz: QuizSummary) -> Element {
    rsx! {
        li { class: "quiz-card",
            Link {
                to: Route::Quiz { quiz_id: quiz.id.to_string() },
                h3 { "{quiz.title}" }
            }
            if let Some(description) = quiz.description.as_deref() {
                p { "{description}" }
            }
            if let Some(limit) = quiz.time_limit_secs {
                p { class: "muted", "Time limit: {format_timer(limit)}" }
            }
        }
    }
}
