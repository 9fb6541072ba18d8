use std::future::Future;

use tokio::task::JoinHandle;

use crate::focus::FocusRegistration;

/// Owns a spawned task and aborts it when dropped.
pub(super) struct TaskGuard(JoinHandle<()>);

impl TaskGuard {
    pub(super) fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self(tokio::spawn(future))
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A running focus observer: the forwarding task and the listener
/// registration, released together.
pub(super) struct MonitorGuard {
    pub(super) _forwarder: TaskGuard,
    pub(super) _registration: FocusRegistration,
}
