use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{
    Question, Quiz, QuizId, QuizSummary, ResultError, SubmissionRequest, SubmissionResult,
};
use quiz_core::time::fixed_clock;
use services::{
    ApiError, AppServices, AuthService, CatalogService, FocusHub, LoginGrant, QuizApi,
    QuizSessionService, SessionSettings,
};
use storage::repository::Storage;
use tokio::sync::watch;

use crate::context::{UiApp, build_app_context};
use crate::views::{QuizView, TopicsView, use_toast_provider};

/// Serves one fixed quiz and never accepts submissions.
pub struct StaticQuizApi {
    pub quiz: Quiz,
}

impl StaticQuizApi {
    pub fn sample() -> Self {
        let questions = vec![
            Question::new(
                0,
                "Which keyword moves ownership into a closure?",
                vec!["move".into(), "ref".into(), "static".into()],
            )
            .unwrap(),
            Question::new(1, "Is `&mut T` Copy?", vec!["Yes".into(), "No".into()]).unwrap(),
        ];
        Self {
            quiz: Quiz::new("Ownership", 120, questions).unwrap(),
        }
    }
}

#[async_trait]
impl QuizApi for StaticQuizApi {
    async fn list_quizzes(&self, _auth: Option<&str>) -> Result<Vec<QuizSummary>, ApiError> {
        Ok(vec![QuizSummary {
            id: QuizId::new("ownership").unwrap(),
            title: self.quiz.title().to_string(),
            description: Some("Moves, borrows and lifetimes".into()),
            time_limit_secs: Some(self.quiz.time_limit_secs()),
        }])
    }

    async fn fetch_quiz(&self, _quiz_id: &QuizId, _auth: Option<&str>) -> Result<Quiz, ApiError> {
        Ok(self.quiz.clone())
    }

    async fn submit(
        &self,
        _request: &SubmissionRequest,
        _auth: Option<&str>,
    ) -> Result<SubmissionResult, ApiError> {
        Err(ApiError::InvalidResult(ResultError::ScoreOutOfRange(101)))
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<LoginGrant, ApiError> {
        Err(ApiError::InvalidResult(ResultError::ScoreOutOfRange(101)))
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        self.services.quiz_sessions()
    }

    fn focus_hub(&self) -> FocusHub {
        self.services.focus_hub()
    }

    fn initial_quiz(&self) -> Option<QuizId> {
        None
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Topics,
    Quiz(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    open_quiz: watch::Receiver<String>,
}

/// Quiz id the harness route should show; the test may change it.
#[derive(Clone)]
struct OpenQuiz(watch::Receiver<String>);

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    use_context_provider(|| OpenQuiz(props.open_quiz.clone()));
    use_toast_provider();
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Topics => rsx! { TopicsView {} },
        ViewKind::Quiz(_) => rsx! { SwitchableQuiz {} },
    }
}

#[component]
fn SwitchableQuiz() -> Element {
    let OpenQuiz(requested) = use_context::<OpenQuiz>();
    let mut quiz_id = use_signal({
        let initial = requested.borrow().clone();
        move || initial
    });
    use_hook(move || {
        let mut requested = requested;
        spawn(async move {
            while requested.changed().await.is_ok() {
                let next = requested.borrow_and_update().clone();
                quiz_id.set(next);
            }
        });
    });
    rsx! { QuizView { quiz_id: quiz_id() } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub focus_hub: FocusHub,
    open_quiz: watch::Sender<String>,
}

impl ViewHarness {
    /// Point a quiz harness at another quiz id, as a route change would.
    pub fn open_quiz(&self, quiz_id: &str) {
        self.open_quiz.send_replace(quiz_id.to_string());
    }

    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until the rendered html contains `needle` or give up.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        for _ in 0..40 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, api: StaticQuizApi) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::with_parts(
        &storage,
        Arc::new(api),
        fixed_clock(),
        SessionSettings::default(),
    );
    let focus_hub = services.focus_hub();
    let app = Arc::new(TestApp { services });
    let initial_quiz = match &view {
        ViewKind::Quiz(quiz_id) => quiz_id.clone(),
        ViewKind::Topics => String::new(),
    };
    let (open_quiz, open_quiz_rx) = watch::channel(initial_quiz);
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            open_quiz: open_quiz_rx,
        },
    );
    ViewHarness {
        dom,
        focus_hub,
        open_quiz,
    }
}
