use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use quiz_core::model::QuizId;
use services::{AuthService, CatalogService, FocusHub, QuizSessionService};

pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn quiz_sessions(&self) -> Arc<QuizSessionService>;
    fn focus_hub(&self) -> FocusHub;

    /// Quiz to open right after launch, if one was configured.
    fn initial_quiz(&self) -> Option<QuizId>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    quiz_sessions: Arc<QuizSessionService>,
    focus_hub: FocusHub,
    initial_quiz: Option<QuizId>,
    initial_quiz_pending: Arc<AtomicBool>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let initial_quiz = app.initial_quiz();
        Self {
            auth: app.auth(),
            catalog: app.catalog(),
            quiz_sessions: app.quiz_sessions(),
            focus_hub: app.focus_hub(),
            initial_quiz_pending: Arc::new(AtomicBool::new(initial_quiz.is_some())),
            initial_quiz,
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.quiz_sessions)
    }

    #[must_use]
    pub fn focus_hub(&self) -> FocusHub {
        self.focus_hub.clone()
    }

    /// The configured launch quiz, handed out once.
    #[must_use]
    pub fn take_initial_quiz(&self) -> Option<QuizId> {
        if self.initial_quiz_pending.swap(false, Ordering::AcqRel) {
            self.initial_quiz.clone()
        } else {
            None
        }
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
