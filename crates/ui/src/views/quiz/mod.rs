mod components;
mod view;

pub use components::{
    ActiveQuiz, IntegrityBanner, QuestionCard, QuizHeader, QuizNav, ResultsCard, TerminatedNotice,
};
pub use view::QuizView;
