use std::sync::Arc;

use quiz_core::model::QuizSummary;
use storage::repository::CredentialStore;

use crate::api::QuizApi;
use crate::auth_service::bearer_token;
use crate::error::ApiError;

/// Lists the quizzes a user can take.
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn QuizApi>,
    credentials: Arc<dyn CredentialStore>,
}

impl CatalogService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { api, credentials }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the listing cannot be fetched.
    pub async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ApiError> {
        let token = bearer_token(self.credentials.as_ref()).await;
        let quizzes = self.api.list_quizzes(token.as_deref()).await?;
        tracing::debug!(count = quizzes.len(), "fetched quiz catalogue");
        Ok(quizzes)
    }
}
