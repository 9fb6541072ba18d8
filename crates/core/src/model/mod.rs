mod answers;
mod credentials;
mod ids;
mod quiz;
mod result;

pub use answers::{AnswerSheet, UNANSWERED};
pub use credentials::{Credentials, CredentialsError, UserProfile};
pub use ids::{QuizId, QuizIdError};
pub use quiz::{MIN_OPTIONS, Question, Quiz, QuizError, QuizSummary};
pub use result::{ResultError, SubmissionRequest, SubmissionResult};
