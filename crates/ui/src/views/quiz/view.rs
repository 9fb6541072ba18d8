use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::{Destination, QuizSession};
use quiz_core::model::QuizId;
use services::SessionSignal;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::use_toasts;
use crate::vm::{QuizPhase, quiz_phase};

use super::components::{ActiveQuiz, ResultsCard, TerminatedNotice};

fn route_for(destination: Destination) -> Route {
    match destination {
        Destination::Topics => Route::Topics {},
        Destination::Login => Route::Login {},
    }
}

#[component]
pub fn QuizView(quiz_id: String) -> Element {
    match QuizId::new(quiz_id.as_str()) {
        // Keyed so a different quiz id mounts a fresh screen and session.
        Ok(id) => rsx! { QuizSessionScreen { key: "{id}", quiz_id: id.clone() } },
        Err(err) => rsx! {
            div { class: "page",
                p { class: "error", "Invalid quiz: {err}" }
                Link { to: Route::Topics {}, "Back to Topics" }
            }
        },
    }
}

/// Owns one running session. Leaving the screen drops the control, which
/// tears the session down.
#[component]
fn QuizSessionScreen(quiz_id: QuizId) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut toasts = use_toasts();

    let mut snapshot = use_signal({
        let quiz_id = quiz_id.clone();
        move || QuizSession::new(quiz_id)
    });

    let control = use_hook(move || {
        let (control, mut signals) = ctx.quiz_sessions().start(quiz_id).into_parts();

        let mut state = control.watch();
        spawn(async move {
            while state.changed().await.is_ok() {
                let latest = state.borrow_and_update().clone();
                snapshot.set(latest);
            }
        });

        spawn(async move {
            while let Some(signal) = signals.next().await {
                match signal {
                    SessionSignal::Notice(notice) => toasts.push(notice),
                    SessionSignal::Navigate(destination) => {
                        navigator.replace(route_for(destination));
                    }
                }
            }
        });

        control
    });

    let on_select = {
        let control = control.clone();
        move |option: usize| control.select_current(option)
    };
    let on_retreat = {
        let control = control.clone();
        move |()| control.retreat()
    };
    let on_advance = {
        let control = control.clone();
        move |()| control.advance()
    };
    let on_submit = move |()| control.submit();

    let phase = quiz_phase(&snapshot.read());
    rsx! {
        div { class: "page quiz", id: "quiz-page",
            match phase {
                QuizPhase::Loading => rsx! {
                    div { class: "quiz-loading", p { "Loading quiz..." } }
                },
                QuizPhase::Active(vm) => rsx! {
                    ActiveQuiz {
                        vm: *vm,
                        on_select,
                        on_retreat,
                        on_advance,
                        on_submit,
                    }
                },
                QuizPhase::Finished(result) => rsx! {
                    ResultsCard {
                        result,
                        on_back: move |()| {
                            navigator.push(Route::Topics {});
                        },
                    }
                },
                QuizPhase::Terminated => rsx! { TerminatedNotice {} },
                QuizPhase::Closed => rsx! {
                    p { class: "muted", "Leaving quiz..." }
                },
            }
        }
    }
}
