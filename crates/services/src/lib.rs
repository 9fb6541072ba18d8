#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod catalog_service;
pub mod config;
pub mod error;
pub mod focus;
pub mod quiz_session;

pub use quiz_core::Clock;

pub use api::{HttpQuizApi, LoginGrant, QuizApi};
pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use config::{ApiConfig, DEFAULT_API_BASE_URL, SessionSettings};
pub use error::{ApiError, AppServicesError, AuthError, ConfigError};
pub use focus::{FocusHub, FocusRegistration, FocusSignal, FocusSource, FocusSubscription};
pub use quiz_session::{
    QuizSessionService, SessionControl, SessionHandle, SessionSignal, SessionSignals,
};
