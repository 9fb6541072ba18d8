use std::env;
use std::time::Duration;

use url::Url;

use quiz_core::MAX_WARNINGS;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Where the quiz backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    request_timeout: Duration,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if `raw` is not an absolute http(s) URL.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
            raw: raw.to_string(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(10),
        })
    }

    /// Reads `QUIZ_API_URL`, falling back to the local development backend.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the variable holds an unusable URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("QUIZ_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());
        Self::new(&raw)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Absolute URL for an API path such as `quizzes/abc`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Timing and policy knobs for a running quiz session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub tick_interval: Duration,
    pub redirect_grace: Duration,
    pub max_warnings: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            redirect_grace: Duration::from_secs(2),
            max_warnings: MAX_WARNINGS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = ApiConfig::new("https://quiz.example.com/api/").unwrap();
        assert_eq!(
            config.endpoint("/quizzes/q1"),
            "https://quiz.example.com/api/quizzes/q1"
        );
        let config = ApiConfig::new("http://localhost:8000/api").unwrap();
        assert_eq!(config.endpoint("quiz/submit"), "http://localhost:8000/api/quiz/submit");
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        assert!(matches!(
            ApiConfig::new("/api"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ApiConfig::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[test]
    fn default_session_settings() {
        let settings = SessionSettings::default();
        assert_eq!(settings.tick_interval, Duration::from_secs(1));
        assert_eq!(settings.redirect_grace, Duration::from_secs(2));
        assert_eq!(settings.max_warnings, 3);
    }
}
