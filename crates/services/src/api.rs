use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use quiz_core::model::{
    Question, Quiz, QuizError, QuizId, QuizSummary, SubmissionRequest, SubmissionResult,
    UserProfile,
};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Token and user handed back by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub access_token: String,
    pub user: UserProfile,
}

/// Contract for the quiz backend. `auth` is the bearer token, when signed in.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// `GET /quizzes`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status or payload failures.
    async fn list_quizzes(&self, auth: Option<&str>) -> Result<Vec<QuizSummary>, ApiError>;

    /// `GET /quizzes/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status or payload failures.
    async fn fetch_quiz(&self, quiz_id: &QuizId, auth: Option<&str>) -> Result<Quiz, ApiError>;

    /// `POST /quiz/submit`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status or payload failures.
    async fn submit(
        &self,
        request: &SubmissionRequest,
        auth: Option<&str>,
    ) -> Result<SubmissionResult, ApiError>;

    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status or payload failures.
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, ApiError>;
}

/// `QuizApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpQuizApi {
    client: Client,
    config: ApiConfig,
}

impl HttpQuizApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn prepare(&self, builder: RequestBuilder, auth: Option<&str>) -> RequestBuilder {
        let builder = builder.timeout(self.config.request_timeout());
        match auth {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }
        Ok(response)
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn list_quizzes(&self, auth: Option<&str>) -> Result<Vec<QuizSummary>, ApiError> {
        let url = self.config.endpoint("quizzes");
        let response = Self::send(self.prepare(self.client.get(url), auth)).await?;
        let body: Vec<QuizListItem> = response.json().await?;
        body.into_iter().map(QuizListItem::into_summary).collect()
    }

    async fn fetch_quiz(&self, quiz_id: &QuizId, auth: Option<&str>) -> Result<Quiz, ApiError> {
        let url = self.config.endpoint(&format!("quizzes/{quiz_id}"));
        let response = Self::send(self.prepare(self.client.get(url), auth)).await?;
        let body: QuizPayload = response.json().await?;
        Ok(body.into_quiz()?)
    }

    async fn submit(
        &self,
        request: &SubmissionRequest,
        auth: Option<&str>,
    ) -> Result<SubmissionResult, ApiError> {
        let url = self.config.endpoint("quiz/submit");
        let response =
            Self::send(self.prepare(self.client.post(url).json(request), auth)).await?;
        let body: SubmissionResult = response.json().await?;
        Ok(body.validate()?)
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, ApiError> {
        let url = self.config.endpoint("auth/login");
        let payload = LoginRequest { email, password };
        let response = Self::send(self.prepare(self.client.post(url).json(&payload), None)).await?;
        let body: LoginResponse = response.json().await?;
        Ok(LoginGrant {
            access_token: body.access_token,
            user: body.user,
        })
    }
}

// ─── Wire shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct QuizPayload {
    title: String,
    time_limit: u32,
    questions: Vec<QuestionPayload>,
}

#[derive(Debug, Deserialize)]
struct QuestionPayload {
    question: String,
    options: Vec<String>,
}

impl QuizPayload {
    pub(crate) fn into_quiz(self) -> Result<Quiz, QuizError> {
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, q)| Question::new(index, q.question, q.options))
            .collect::<Result<Vec<_>, _>>()?;
        Quiz::new(self.title, self.time_limit, questions)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizListItem {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    time_limit: Option<u32>,
}

impl QuizListItem {
    pub(crate) fn into_summary(self) -> Result<QuizSummary, ApiError> {
        Ok(QuizSummary {
            id: QuizId::new(self.id)?,
            title: self.title,
            description: self.description,
            time_limit_secs: self.time_limit,
        })
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    user: UserProfile,
}
