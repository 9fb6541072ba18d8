use std::sync::Arc;

use quiz_core::{Destination, QuizSession, SessionEffect, SessionEvent, SubmitOrigin};
use storage::repository::CredentialStore;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};

use crate::api::QuizApi;
use crate::auth_service::bearer_token;
use crate::config::SessionSettings;
use crate::focus::{FocusSignal, FocusSource};

use super::guard::{MonitorGuard, TaskGuard};
use super::handle::SessionSignal;

/// Owns one quiz session and serializes every input through its event queue.
pub(super) struct SessionRuntime {
    session: QuizSession,
    api: Arc<dyn QuizApi>,
    credentials: Arc<dyn CredentialStore>,
    focus: Arc<dyn FocusSource>,
    settings: SessionSettings,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    state_tx: watch::Sender<QuizSession>,
    signals_tx: mpsc::UnboundedSender<SessionSignal>,
    timer: Option<TaskGuard>,
    monitor: Option<MonitorGuard>,
}

pub(super) struct RuntimeParts {
    pub(super) api: Arc<dyn QuizApi>,
    pub(super) credentials: Arc<dyn CredentialStore>,
    pub(super) focus: Arc<dyn FocusSource>,
    pub(super) settings: SessionSettings,
    pub(super) events_tx: mpsc::UnboundedSender<SessionEvent>,
    pub(super) events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    pub(super) state_tx: watch::Sender<QuizSession>,
    pub(super) signals_tx: mpsc::UnboundedSender<SessionSignal>,
}

impl SessionRuntime {
    pub(super) fn new(session: QuizSession, parts: RuntimeParts) -> Self {
        Self {
            session,
            api: parts.api,
            credentials: parts.credentials,
            focus: parts.focus,
            settings: parts.settings,
            events_tx: parts.events_tx,
            events_rx: parts.events_rx,
            state_tx: parts.state_tx,
            signals_tx: parts.signals_tx,
            timer: None,
            monitor: None,
        }
    }

    /// Fetch the quiz, then process events until the session is finished or
    /// torn down. Timer and focus observer never outlive this call.
    pub(super) async fn run(mut self) {
        let quiz_id = self.session.quiz_id().clone();
        tracing::info!(%quiz_id, "quiz session started");
        self.spawn_fetch();

        while let Some(event) = self.events_rx.recv().await {
            tracing::trace!(?event, "session event");
            let effects = self.session.apply(event);
            for effect in effects {
                self.execute(effect).await;
            }
            self.state_tx.send_replace(self.session.clone());

            if self.session.is_closed() || self.session.status().is_terminal() {
                break;
            }
        }

        self.timer = None;
        self.monitor = None;
        tracing::info!(
            %quiz_id,
            status = ?self.session.status(),
            closed = self.session.is_closed(),
            "quiz session finished"
        );
    }

    async fn execute(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::StartTimer => self.start_timer(),
            SessionEffect::StopTimer => self.timer = None,
            SessionEffect::StartMonitor => self.start_monitor(),
            SessionEffect::StopMonitor => self.monitor = None,
            SessionEffect::Submit { request, origin } => {
                let token = bearer_token(self.credentials.as_ref()).await;
                let api = Arc::clone(&self.api);
                let events = self.events_tx.clone();
                tracing::info!(
                    quiz_id = %request.quiz_id,
                    ?origin,
                    time_taken = request.time_taken,
                    "submitting quiz"
                );
                tokio::spawn(async move {
                    let event = match api.submit(&request, token.as_deref()).await {
                        Ok(result) => {
                            tracing::info!(score = result.score, "quiz submitted");
                            SessionEvent::SubmitSucceeded(result)
                        }
                        Err(err) => {
                            if origin == SubmitOrigin::TimeExpired {
                                tracing::error!("submit after time expiry failed: {err}");
                            } else {
                                tracing::warn!("submit failed: {err}");
                            }
                            SessionEvent::SubmitFailed(err.to_string())
                        }
                    };
                    // Session may be gone by now; then the result is dropped.
                    let _ = events.send(event);
                });
            }
            SessionEffect::Notify(notice) => self.signal(SessionSignal::Notice(notice)),
            SessionEffect::InputRejected(err) => {
                tracing::debug!(quiz_id = %self.session.quiz_id(), "input rejected: {err}");
            }
            SessionEffect::ClearCredentials => {
                if let Err(err) = self.credentials.clear().await {
                    tracing::error!("could not clear stored credentials: {err}");
                } else {
                    tracing::warn!(quiz_id = %self.session.quiz_id(), "session terminated, credentials cleared");
                }
            }
            SessionEffect::Navigate(destination) => {
                self.signal(SessionSignal::Navigate(destination));
            }
            SessionEffect::NavigateAfterGrace(destination) => {
                self.navigate_after(destination);
            }
        }
    }

    fn spawn_fetch(&self) {
        let api = Arc::clone(&self.api);
        let credentials = Arc::clone(&self.credentials);
        let events = self.events_tx.clone();
        let quiz_id = self.session.quiz_id().clone();
        tokio::spawn(async move {
            let token = bearer_token(credentials.as_ref()).await;
            let event = match api.fetch_quiz(&quiz_id, token.as_deref()).await {
                Ok(quiz) => SessionEvent::Loaded(quiz),
                Err(err) => {
                    tracing::error!(%quiz_id, "could not load quiz: {err}");
                    SessionEvent::LoadFailed(err.to_string())
                }
            };
            let _ = events.send(event);
        });
    }

    fn start_timer(&mut self) {
        let events = self.events_tx.clone();
        let period = self.settings.tick_interval;
        self.timer = Some(TaskGuard::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if events.send(SessionEvent::Tick).is_err() {
                    break;
                }
            }
        }));
    }

    fn start_monitor(&mut self) {
        let (mut signals, registration) = self.focus.subscribe().into_parts();
        let events = self.events_tx.clone();
        let forwarder = TaskGuard::spawn(async move {
            while let Some(signal) = signals.recv().await {
                let event = match signal {
                    FocusSignal::Lost => SessionEvent::FocusLost,
                    FocusSignal::Regained => SessionEvent::FocusRegained,
                };
                if events.send(event).is_err() {
                    break;
                }
            }
        });
        self.monitor = Some(MonitorGuard {
            _forwarder: forwarder,
            _registration: registration,
        });
    }

    fn navigate_after(&self, destination: Destination) {
        let signals = self.signals_tx.clone();
        let grace = self.settings.redirect_grace;
        tokio::spawn(async move {
            time::sleep(grace).await;
            let _ = signals.send(SessionSignal::Navigate(destination));
        });
    }

    fn signal(&self, signal: SessionSignal) {
        if self.signals_tx.send(signal).is_err() {
            tracing::debug!("no listener for session signals");
        }
    }
}
