use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("access token cannot be empty")]
    EmptyToken,
}

/// The signed-in user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Locally persisted login: bearer token plus user record.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    user: UserProfile,
    saved_at: DateTime<Utc>,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns `CredentialsError::EmptyToken` for a blank token.
    pub fn new(
        token: impl Into<String>,
        user: UserProfile,
        saved_at: DateTime<Utc>,
    ) -> Result<Self, CredentialsError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(CredentialsError::EmptyToken);
        }
        Ok(Self {
            token,
            user,
            saved_at,
        })
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    #[must_use]
    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .field("saved_at", &self.saved_at)
            .finish()
    }
}
