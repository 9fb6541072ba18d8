use std::sync::Arc;

use quiz_core::QuizSession;
use quiz_core::model::QuizId;
use storage::repository::CredentialStore;
use tokio::sync::{mpsc, watch};

use crate::api::QuizApi;
use crate::config::SessionSettings;
use crate::focus::FocusSource;

use super::handle::SessionHandle;
use super::runtime::{RuntimeParts, SessionRuntime};

/// Starts quiz sessions. Each session runs on its own task.
#[derive(Clone)]
pub struct QuizSessionService {
    api: Arc<dyn QuizApi>,
    credentials: Arc<dyn CredentialStore>,
    focus: Arc<dyn FocusSource>,
    settings: SessionSettings,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(
        api: Arc<dyn QuizApi>,
        credentials: Arc<dyn CredentialStore>,
        focus: Arc<dyn FocusSource>,
    ) -> Self {
        Self {
            api,
            credentials,
            focus,
            settings: SessionSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Fetch `quiz_id` and run a session for it. Must be called within a
    /// tokio runtime. Dropping every `SessionControl` tears the session down.
    #[must_use]
    pub fn start(&self, quiz_id: QuizId) -> SessionHandle {
        let session = QuizSession::with_max_warnings(quiz_id, self.settings.max_warnings);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(session.clone());
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();

        let runtime = SessionRuntime::new(
            session,
            RuntimeParts {
                api: Arc::clone(&self.api),
                credentials: Arc::clone(&self.credentials),
                focus: Arc::clone(&self.focus),
                settings: self.settings,
                events_tx: events_tx.clone(),
                events_rx,
                state_tx,
                signals_tx,
            },
        );
        tokio::spawn(runtime.run());

        SessionHandle::new(events_tx, state_rx, signals_rx)
    }
}
