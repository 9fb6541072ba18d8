use dioxus::prelude::*;

use crate::vm::{ActiveQuizVm, IntegrityVm, OptionVm, ResultVm};

#[component]
pub fn IntegrityBanner(integrity: IntegrityVm) -> Element {
    let IntegrityVm {
        warnings,
        max_warnings,
    } = integrity;
    rsx! {
        div { class: "integrity-banner", id: "quiz-integrity",
            p { class: "integrity-title",
                "Anti-Cheat Active: Do not switch tabs or minimize the window"
            }
            p { class: "integrity-count",
                "Warnings: {warnings}/{max_warnings} · You will be logged out after {max_warnings} warnings"
            }
        }
    }
}

#[component]
pub fn QuizHeader(title: String, timer: String, urgent: bool, progress: u32, position: String) -> Element {
    let timer_class = if urgent { "quiz-timer urgent" } else { "quiz-timer" };
    rsx! {
        div { class: "quiz-header",
            div { class: "quiz-header-row",
                h2 { "{title}" }
                span { class: timer_class, id: "quiz-timer", "{timer}" }
            }
            div { class: "progress", id: "quiz-progress",
                div { class: "progress-fill", style: "width: {progress}%" }
            }
            p { class: "muted", "{position}" }
        }
    }
}

#[component]
pub fn QuestionCard(
    prompt: String,
    options: Vec<OptionVm>,
    locked: bool,
    on_select: EventHandler<usize>,
) -> Element {
    rsx! {
        div { class: "question-card", id: "question-card",
            h3 { "{prompt}" }
            div { class: "options",
                for option in options {
                    button {
                        key: "{option.index}",
                        r#type: "button",
                        id: "option-{option.index}",
                        class: if option.selected { "option selected" } else { "option" },
                        disabled: locked,
                        onclick: move |_| on_select.call(option.index),
                        span { class: "option-letter", "{option.letter}. " }
                        "{option.text}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn QuizNav(
    can_retreat: bool,
    is_last: bool,
    can_submit: bool,
    submitting: bool,
    on_retreat: EventHandler<()>,
    on_advance: EventHandler<()>,
    on_submit: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "quiz-nav",
            button {
                r#type: "button",
                id: "quiz-previous",
                disabled: !can_retreat,
                onclick: move |_| on_retreat.call(()),
                "Previous"
            }
            if is_last {
                button {
                    r#type: "button",
                    id: "quiz-submit",
                    class: "btn-primary",
                    disabled: !can_submit,
                    onclick: move |_| on_submit.call(()),
                    if submitting { "Submitting..." } else { "Submit Quiz" }
                }
            } else {
                button {
                    r#type: "button",
                    id: "quiz-next",
                    class: "btn-primary",
                    onclick: move |_| on_advance.call(()),
                    "Next"
                }
            }
        }
    }
}

#[component]
pub fn ActiveQuiz(
    vm: ActiveQuizVm,
    on_select: EventHandler<usize>,
    on_retreat: EventHandler<()>,
    on_advance: EventHandler<()>,
    on_submit: EventHandler<()>,
) -> Element {
    rsx! {
        IntegrityBanner { integrity: vm.integrity.clone() }
        QuizHeader {
            title: vm.title.clone(),
            timer: vm.timer.clone(),
            urgent: vm.timer_urgent,
            progress: vm.progress_percent,
            position: vm.position_label.clone(),
        }
        if vm.time_expired {
            p { class: "error", "Time is up. Your answers can no longer be changed." }
        }
        QuestionCard {
            prompt: vm.prompt.clone(),
            options: vm.options.clone(),
            locked: vm.time_expired,
            on_select,
        }
        QuizNav {
            can_retreat: vm.can_retreat,
            is_last: vm.is_last,
            can_submit: vm.can_submit,
            submitting: vm.submitting,
            on_retreat,
            on_advance,
            on_submit,
        }
    }
}

#[component]
pub fn ResultsCard(result: ResultVm, on_back: EventHandler<()>) -> Element {
    let verdict = if result.passed { "result-icon passed" } else { "result-icon" };
    rsx! {
        div { class: "results", id: "quiz-results",
            div { class: verdict }
            h1 { "Quiz Complete!" }
            p { class: "muted", "Great effort! Here are your results:" }
            div { class: "stat-card", id: "result-score",
                div { class: "stat-value", "{result.score}%" }
                div { class: "stat-label", "Your Score" }
            }
            div { class: "stat-grid",
                div { class: "stat-card", id: "result-correct",
                    div { class: "stat-value", "{result.correct_label}" }
                    div { class: "stat-label", "Correct Answers" }
                }
                div { class: "stat-card", id: "result-xp",
                    div { class: "stat-value", "{result.xp_label}" }
                    div { class: "stat-label", "XP Earned" }
                }
            }
            if !result.badges.is_empty() {
                div { class: "card", id: "result-badges",
                    h3 { "New Badges Earned!" }
                    for badge in result.badges.iter() {
                        span { key: "{badge}", class: "badge", "{badge}" }
                    }
                }
            }
            button {
                r#type: "button",
                class: "btn-primary",
                id: "back-to-topics",
                onclick: move |_| on_back.call(()),
                "Back to Topics"
            }
        }
    }
}

#[component]
pub fn TerminatedNotice() -> Element {
    rsx! {
        div { class: "terminated", id: "quiz-terminated",
            h2 { "Quiz ended" }
            p { "You have been logged out due to repeated tab switching violations." }
            p { class: "muted", "Redirecting to sign in..." }
        }
    }
}
