use thiserror::Error;

use crate::model::ids::QuizId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    NoQuestions,

    #[error("question {index} has an empty prompt")]
    EmptyPrompt { index: usize },

    #[error("question {index} has {count} options, at least 2 required")]
    TooFewOptions { index: usize, count: usize },
}

/// Minimum number of options a question must offer.
pub const MIN_OPTIONS: usize = 2;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
}

impl Question {
    /// Build a question, checking the option count.
    ///
    /// `index` is only used to make the error point at the offending question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyPrompt` or `QuizError::TooFewOptions`.
    pub fn new(
        index: usize,
        prompt: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, QuizError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuizError::EmptyPrompt { index });
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuizError::TooFewOptions {
                index,
                count: options.len(),
            });
        }
        Ok(Self { prompt, options })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// A quiz definition as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    title: String,
    time_limit_secs: u32,
    questions: Vec<Question>,
}

impl Quiz {
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty question list.
    pub fn new(
        title: impl Into<String>,
        time_limit_secs: u32,
        questions: Vec<Question>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self {
            title: title.into(),
            time_limit_secs,
            questions,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Listing entry for the quiz catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    pub description: Option<String>,
    pub time_limit_secs: Option<u32>,
}
