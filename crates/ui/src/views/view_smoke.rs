use dioxus::prelude::*;
use services::FocusSignal;

use super::test_harness::{StaticQuizApi, ViewKind, setup_view_harness};
use crate::views::{IntegrityBanner, QuestionCard, QuizNav, ResultsCard};
use crate::vm::{IntegrityVm, OptionVm, ResultVm};

fn render(root: fn() -> Element) -> String {
    let mut dom = VirtualDom::new(root);
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[test]
fn integrity_banner_shows_warning_count() {
    fn root() -> Element {
        rsx! {
            IntegrityBanner { integrity: IntegrityVm { warnings: 2, max_warnings: 3 } }
        }
    }
    let html = render(root);
    assert!(html.contains("Anti-Cheat Active"), "missing banner in {html}");
    assert!(html.contains("Warnings: 2/3"), "missing count in {html}");
}

#[test]
fn question_card_marks_selected_option() {
    fn root() -> Element {
        let options = vec![
            OptionVm {
                index: 0,
                letter: 'A',
                text: "Stack".into(),
                selected: false,
            },
            OptionVm {
                index: 1,
                letter: 'B',
                text: "Heap".into(),
                selected: true,
            },
        ];
        rsx! {
            QuestionCard {
                prompt: "Where does a Box allocate?",
                options,
                locked: false,
                on_select: move |_| {},
            }
        }
    }
    let html = render(root);
    assert!(html.contains("Where does a Box allocate?"), "missing prompt in {html}");
    assert!(html.contains("A. "), "missing letter in {html}");
    assert!(html.contains("option selected"), "missing selection in {html}");
    assert_eq!(html.matches("option selected").count(), 1);
}

#[test]
fn nav_offers_submit_only_on_last_question() {
    fn middle() -> Element {
        rsx! {
            QuizNav {
                can_retreat: true,
                is_last: false,
                can_submit: false,
                submitting: false,
                on_retreat: move |()| {},
                on_advance: move |()| {},
                on_submit: move |()| {},
            }
        }
    }
    fn last() -> Element {
        rsx! {
            QuizNav {
                can_retreat: true,
                is_last: true,
                can_submit: true,
                submitting: false,
                on_retreat: move |()| {},
                on_advance: move |()| {},
                on_submit: move |()| {},
            }
        }
    }

    let html = render(middle);
    assert!(html.contains("Next"), "missing next in {html}");
    assert!(!html.contains("Submit Quiz"), "unexpected submit in {html}");

    let html = render(last);
    assert!(html.contains("Submit Quiz"), "missing submit in {html}");
    assert!(!html.contains("quiz-next"), "unexpected next in {html}");
}

#[test]
fn results_card_lists_score_and_badges() {
    fn root() -> Element {
        rsx! {
            ResultsCard {
                result: ResultVm {
                    score: 90,
                    passed: true,
                    correct_label: "9/10".into(),
                    xp_label: "+150".into(),
                    badges: vec!["Perfectionist".into()],
                },
                on_back: move |()| {},
            }
        }
    }
    let html = render(root);
    assert!(html.contains("90%"), "missing score in {html}");
    assert!(html.contains("9/10"), "missing correct count in {html}");
    assert!(html.contains("+150"), "missing xp in {html}");
    assert!(html.contains("Perfectionist"), "missing badge in {html}");
    assert!(html.contains("back-to-topics"), "missing way back in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn topics_view_lists_quizzes() {
    let mut harness = setup_view_harness(ViewKind::Topics, StaticQuizApi::sample());
    harness.rebuild();
    let html = harness.drive_until("Ownership").await;
    assert!(html.contains("Ownership"), "missing quiz title in {html}");
    assert!(html.contains("Time limit: 2:00"), "missing time limit in {html}");
    assert!(html.contains("Sign in"), "missing sign in link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_loads_first_question_and_counts_violations() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz("ownership".into()),
        StaticQuizApi::sample(),
    );
    harness.rebuild();
    assert!(harness.render().contains("Loading quiz..."));

    let html = harness
        .drive_until("Which keyword moves ownership into a closure?")
        .await;
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
    assert!(html.contains("2:00"), "missing timer in {html}");
    assert!(html.contains("Warnings: 0/3"), "missing banner in {html}");

    harness.focus_hub.emit(FocusSignal::Lost);
    let html = harness.drive_until("Warnings: 1/3").await;
    assert!(html.contains("Warnings: 1/3"), "violation not shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn switching_quiz_id_starts_a_fresh_session() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz("ownership".into()),
        StaticQuizApi::sample(),
    );
    harness.rebuild();
    harness.drive_until("Warnings: 0/3").await;
    harness.focus_hub.emit(FocusSignal::Lost);
    let html = harness.drive_until("Warnings: 1/3").await;
    assert!(html.contains("Warnings: 1/3"), "violation not shown in {html}");

    harness.open_quiz("ownership-advanced");
    let html = harness.drive_until("Warnings: 0/3").await;
    assert!(html.contains("Warnings: 0/3"), "old session still shown in {html}");
    harness.drive_async().await;
    assert_eq!(harness.focus_hub.listener_count(), 1);
}
