//! Error handling

use axum::response::IntoResponse;
use tracing::info;

/// definitions for the pingapp application.
#[derive(Debug)]
pub enum PingAppError {
    /// Missing or invalid session / CSRF token
    Unauthorized,
    /// When the session store fails
    SessionError(tower_sessions::session::Error),
    /// Bad configuration, eg an API URL that can't be a base
    ConfigError(String),
}

impl std::fmt::Display for PingAppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::SessionError(err) => write!(f, "Session error: {err}"),
            Self::ConfigError(message) => write!(f, "Configuration error: {message}"),
        }
    }
}

impl std::error::Error for PingAppError {}

impl From<tower_sessions::session::Error> for PingAppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        PingAppError::SessionError(err)
    }
}

impl From<url::ParseError> for PingAppError {
    fn from(err: url::ParseError) -> Self {
        PingAppError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for PingAppError {
    fn from(err: reqwest::Error) -> Self {
        PingAppError::ConfigError(err.to_string())
    }
}

impl IntoResponse for PingAppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            PingAppError::Unauthorized => {
                info!("Unauthorized request received");
                let mut response = axum::response::Response::new(axum::body::Body::from(
                    "Unauthorized: invalid or missing session.",
                ));
                *response.status_mut() = axum::http::StatusCode::UNAUTHORIZED;
                response
            }
            PingAppError::SessionError(err) => {
                tracing::error!("Session error: {}", err);
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Session error"));
                *response.status_mut() = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
            PingAppError::ConfigError(message) => {
                tracing::error!("Configuration error: {}", message);
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Internal server error"));
                *response.status_mut() = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}
