use std::sync::Arc;

use quiz_core::{Destination, Notice, QuizSession, SessionEvent};
use tokio::sync::{mpsc, watch};

/// Out-of-band output of a session: toasts and navigation requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSignal {
    Notice(Notice),
    Navigate(Destination),
}

struct Controller {
    events: mpsc::UnboundedSender<SessionEvent>,
}

// Last control dropped means the screen is gone.
impl Drop for Controller {
    fn drop(&mut self) {
        let _ = self.events.send(SessionEvent::Teardown);
    }
}

/// Cloneable input side of a running session plus its latest state.
#[derive(Clone)]
pub struct SessionControl {
    controller: Arc<Controller>,
    state: watch::Receiver<QuizSession>,
}

impl SessionControl {
    fn send(&self, event: SessionEvent) {
        if self.controller.events.send(event).is_err() {
            tracing::debug!("session already finished; input dropped");
        }
    }

    pub fn select_answer(&self, question: usize, option: usize) {
        self.send(SessionEvent::SelectAnswer { question, option });
    }

    /// Answer the question on screen at the time the event is processed.
    pub fn select_current(&self, option: usize) {
        self.send(SessionEvent::SelectCurrent { option });
    }

    pub fn advance(&self) {
        self.send(SessionEvent::Advance);
    }

    pub fn retreat(&self) {
        self.send(SessionEvent::Retreat);
    }

    pub fn submit(&self) {
        self.send(SessionEvent::SubmitRequested);
    }

    /// Leave the session: timer and focus observer are released and any
    /// in-flight result is ignored.
    pub fn close(&self) {
        self.send(SessionEvent::Teardown);
    }

    /// Snapshot of the latest published state.
    #[must_use]
    pub fn state(&self) -> QuizSession {
        self.state.borrow().clone()
    }

    /// A receiver to await state changes on.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<QuizSession> {
        self.state.clone()
    }
}

/// Stream of `SessionSignal`s. Only one consumer.
pub struct SessionSignals {
    signals: mpsc::UnboundedReceiver<SessionSignal>,
}

impl SessionSignals {
    /// `None` once the session and its pending redirects are gone.
    pub async fn next(&mut self) -> Option<SessionSignal> {
        self.signals.recv().await
    }

    pub fn try_next(&mut self) -> Option<SessionSignal> {
        self.signals.try_recv().ok()
    }
}

/// What `QuizSessionService::start` returns.
pub struct SessionHandle {
    pub control: SessionControl,
    pub signals: SessionSignals,
}

impl SessionHandle {
    pub(super) fn new(
        events: mpsc::UnboundedSender<SessionEvent>,
        state: watch::Receiver<QuizSession>,
        signals: mpsc::UnboundedReceiver<SessionSignal>,
    ) -> Self {
        Self {
            control: SessionControl {
                controller: Arc::new(Controller { events }),
                state,
            },
            signals: SessionSignals { signals },
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (SessionControl, SessionSignals) {
        (self.control, self.signals)
    }
}
