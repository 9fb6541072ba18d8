#![forbid(unsafe_code)]

pub mod integrity;
pub mod model;
pub mod session;
pub mod time;

pub use integrity::{IntegrityMonitor, IntegrityOutcome, MAX_WARNINGS};
pub use session::{
    Destination, Notice, NoticeLevel, QuizSession, SessionEffect, SessionError, SessionEvent,
    SessionStatus, SubmitOrigin,
};
pub use time::Clock;
