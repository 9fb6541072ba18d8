use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizIdError {
    #[error("quiz id cannot be empty")]
    Empty,
    #[error("quiz id contains a path separator: {0}")]
    InvalidCharacter(String),
}

/// Unique identifier for a quiz, as issued by the backend.
///
/// The backend hands out UUID strings, but the client treats ids as opaque.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizId(String);

impl QuizId {
    /// Creates a new `QuizId`.
    ///
    /// # Errors
    ///
    /// Returns `QuizIdError` if the id is blank or would escape its URL path segment.
    pub fn new(id: impl Into<String>) -> Result<Self, QuizIdError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(QuizIdError::Empty);
        }
        if trimmed.contains('/') || trimmed.contains('?') || trimmed.contains('#') {
            return Err(QuizIdError::InvalidCharacter(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for QuizId {
    type Err = QuizIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuizId({})", self.0)
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
