use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuizId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultError {
    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(u32),

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

/// Body of `POST /quiz/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    pub quiz_id: QuizId,
    pub answers: Vec<i64>,
    pub time_taken: u32,
}

/// Server-computed outcome of a submission. Displayed as-is, never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub xp_earned: u32,
    #[serde(default)]
    pub badges_earned: Vec<String>,
}

impl SubmissionResult {
    /// Check the response shape before it reaches the session.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` when the numbers cannot describe a real result.
    pub fn validate(self) -> Result<Self, ResultError> {
        if self.score > 100 {
            return Err(ResultError::ScoreOutOfRange(self.score));
        }
        if self.correct_answers > self.total_questions {
            return Err(ResultError::CorrectExceedsTotal {
                correct: self.correct_answers,
                total: self.total_questions,
            });
        }
        Ok(self)
    }

    /// Scores at or above 80 are shown as a pass.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.score >= 80
    }
}
