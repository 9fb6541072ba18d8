mod guard;
mod handle;
mod runtime;
mod service;

// Public API of the quiz session subsystem.
pub use handle::{SessionControl, SessionHandle, SessionSignal, SessionSignals};
pub use service::QuizSessionService;
