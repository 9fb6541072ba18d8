use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::api::{HttpQuizApi, QuizApi};
use crate::auth_service::AuthService;
use crate::catalog_service::CatalogService;
use crate::config::{ApiConfig, SessionSettings};
use crate::error::AppServicesError;
use crate::focus::{FocusHub, FocusSource};
use crate::quiz_session::QuizSessionService;

/// Assembles app-facing services around one backend and one credential store.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    quiz_sessions: Arc<QuizSessionService>,
    focus_hub: FocusHub,
}

impl AppServices {
    /// Build services backed by `SQLite` credential storage and the HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        api: ApiConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let api: Arc<dyn QuizApi> = Arc::new(HttpQuizApi::new(api));
        Ok(Self::with_parts(
            &storage,
            api,
            clock,
            SessionSettings::default(),
        ))
    }

    /// Wire services over an already-built storage and API client.
    #[must_use]
    pub fn with_parts(
        storage: &Storage,
        api: Arc<dyn QuizApi>,
        clock: Clock,
        settings: SessionSettings,
    ) -> Self {
        let focus_hub = FocusHub::new();
        let focus: Arc<dyn FocusSource> = Arc::new(focus_hub.clone());

        let auth = Arc::new(AuthService::new(
            clock,
            Arc::clone(&api),
            Arc::clone(&storage.credentials),
        ));
        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&api),
            Arc::clone(&storage.credentials),
        ));
        let quiz_sessions = Arc::new(
            QuizSessionService::new(api, Arc::clone(&storage.credentials), focus)
                .with_settings(settings),
        );

        Self {
            auth,
            catalog,
            quiz_sessions,
            focus_hub,
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

    /// Where the host window reports focus changes.
    #[must_use]
    pub fn focus_hub(&self) -> FocusHub {
        self.focus_hub.clone()
    }
}
