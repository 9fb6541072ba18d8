use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::Credentials;
use storage::repository::CredentialStore;

use crate::api::QuizApi;
use crate::error::AuthError;

/// Sign-in, sign-out and access to the stored login.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    api: Arc<dyn QuizApi>,
    credentials: Arc<dyn CredentialStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        clock: Clock,
        api: Arc<dyn QuizApi>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            clock,
            api,
            credentials,
        }
    }

    /// Log in and persist the returned token and user record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` for blank input, or API/storage errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        let grant = self.api.login(email, password).await?;
        let credentials = Credentials::new(grant.access_token, grant.user, self.clock.now())?;
        self.credentials.save(&credentials).await?;
        tracing::info!(user = %credentials.user().username, "signed in");
        Ok(credentials)
    }

    /// The stored login, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the store cannot be read.
    pub async fn current(&self) -> Result<Option<Credentials>, AuthError> {
        Ok(self.credentials.load().await?)
    }

    /// Forget the stored login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the store cannot be written.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.credentials.clear().await?;
        tracing::info!("signed out");
        Ok(())
    }
}

/// Bearer token for outgoing requests. A broken store means anonymous.
pub(crate) async fn bearer_token(store: &dyn CredentialStore) -> Option<String> {
    match store.load().await {
        Ok(credentials) => credentials.map(|c| c.token().to_string()),
        Err(err) => {
            tracing::warn!("could not read stored credentials: {err}");
            None
        }
    }
}
