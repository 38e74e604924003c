//! Error responses for the web surface.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::FetchError;
use quill_core::ports::AuthError;
use quill_shared::ErrorBody;
use std::fmt;

/// Application-level error type mapping the core taxonomy to HTTP.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    /// A collaborator call failed; the client may retry.
    Upstream(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Upstream(msg) => write!(f, "Backend unavailable: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::BadRequest(detail) => ErrorBody::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorBody::unauthorized(detail),
            AppError::NotFound(detail) => ErrorBody::new(404, "Not Found").with_detail(detail),
            AppError::Upstream(detail) => ErrorBody::upstream(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorBody::internal()
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Fetch(msg) => AppError::Upstream(msg),
            FetchError::NotFound => AppError::NotFound("no such resource".to_string()),
            FetchError::Unauthorized => AppError::Unauthorized(err.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            AuthError::Transport(_) | AuthError::Service { .. } => {
                AppError::Upstream(err.to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
