//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{CredentialsError, QuizError, QuizIdError, ResultError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the quiz backend client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid quiz payload: {0}")]
    InvalidQuiz(#[from] QuizError),
    #[error("invalid quiz id in payload: {0}")]
    InvalidQuizId(#[from] QuizIdError),
    #[error("invalid submission result: {0}")]
    InvalidResult(#[from] ResultError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("email and password are required")]
    MissingFields,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL {raw:?}: {source}")]
    InvalidBaseUrl {
        raw: String,
        source: url::ParseError,
    },
    #[error("API base URL must use http or https, got {0}")]
    UnsupportedScheme(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
