mod focus;
mod login;
mod quiz;
mod state;
mod toasts;
mod topics;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use focus::run_focus_bridge;
pub use login::LoginView;
pub use quiz::{
    ActiveQuiz, IntegrityBanner, QuestionCard, QuizHeader, QuizNav, QuizView, ResultsCard,
    TerminatedNotice,
};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use toasts::{TOAST_TTL, Toast, ToastStack, Toasts, level_class, use_toast_provider, use_toasts};
pub use topics::TopicsView;
