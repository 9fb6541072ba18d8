//! Window focus signals and the subscription contract the integrity monitor
//! listens through.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSignal {
    /// The quiz surface went to the background (tab switch, minimize, blur).
    Lost,
    Regained,
}

/// A host capability that reports focus transitions.
pub trait FocusSource: Send + Sync {
    fn subscribe(&self) -> FocusSubscription;
}

/// Deregisters a listener when dropped.
pub struct FocusRegistration {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl FocusRegistration {
    #[must_use]
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for FocusRegistration {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// A live listener: the signal stream plus its registration.
pub struct FocusSubscription {
    signals: mpsc::UnboundedReceiver<FocusSignal>,
    registration: FocusRegistration,
}

impl FocusSubscription {
    #[must_use]
    pub fn new(
        signals: mpsc::UnboundedReceiver<FocusSignal>,
        registration: FocusRegistration,
    ) -> Self {
        Self {
            signals,
            registration,
        }
    }

    pub async fn recv(&mut self) -> Option<FocusSignal> {
        self.signals.recv().await
    }

    /// Split so the stream can move into a task while the caller keeps the
    /// registration and controls exactly when the listener goes away.
    #[must_use]
    pub fn into_parts(self) -> (mpsc::UnboundedReceiver<FocusSignal>, FocusRegistration) {
        (self.signals, self.registration)
    }
}

/// In-process fan-out of focus signals. The UI pushes, sessions subscribe.
#[derive(Clone, Default)]
pub struct FocusHub {
    listeners: Arc<Mutex<HashMap<u64, mpsc::UnboundedSender<FocusSignal>>>>,
    next_id: Arc<AtomicU64>,
}

impl FocusHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a signal to every live listener.
    pub fn emit(&self, signal: FocusSignal) {
        let Ok(mut listeners) = self.listeners.lock() else {
            tracing::warn!("focus hub lock poisoned; dropping {signal:?}");
            return;
        };
        listeners.retain(|_, tx| tx.send(signal).is_ok());
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().map_or(0, |listeners| listeners.len())
    }
}

impl FocusSource for FocusHub {
    fn subscribe(&self) -> FocusSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.insert(id, tx);
        }
        let listeners = Arc::clone(&self.listeners);
        let registration = FocusRegistration::new(move || {
            if let Ok(mut listeners) = listeners.lock() {
                listeners.remove(&id);
            }
        });
        FocusSubscription::new(rx, registration)
    }
}
