//! Error handling - maps domain failures onto the response envelope.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use quill_core::domain::FieldErrors;
use quill_core::error::{DomainError, RepoError};
use quill_shared::ApiMessage;
use quill_shared::response::FieldErrorMap;

/// Application-level error type that converts to envelope responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    /// Ownership-scoped lookup miss; deliberately does not reveal whether
    /// the post exists.
    NotFoundOrForbidden,
    Validation(FieldErrors),
    SignatureInvalid(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Authentication required"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::NotFoundOrForbidden => write!(f, "Not found or forbidden"),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::SignatureInvalid(msg) => write!(f, "Invalid signature: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

/// Convert the borrowed-key domain map into the owned wire map.
fn to_error_map(errors: &FieldErrors) -> FieldErrorMap {
    errors
        .iter()
        .map(|(field, message)| (field.to_string(), message.clone()))
        .collect()
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::SignatureInvalid(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let envelope = match self {
            AppError::BadRequest(msg) => ApiMessage::new(msg.clone()),
            AppError::Unauthorized => ApiMessage::new("Authentication required"),
            AppError::NotFound(msg) => ApiMessage::new(msg.clone()),
            AppError::NotFoundOrForbidden => {
                ApiMessage::new("Post not found or permission denied")
            }
            AppError::Validation(errors) => {
                ApiMessage::new("Validation failed").with_errors(to_error_map(errors))
            }
            AppError::SignatureInvalid(msg) => {
                ApiMessage::new("Invalid signature").with_err(msg.clone())
            }
            AppError::Internal(detail) => {
                // Log internal errors; the raw text is echoed for operator
                // visibility, not for end-user parsing.
                tracing::error!("Internal error: {}", detail);
                ApiMessage::new("Error").with_err(detail.clone())
            }
        };

        HttpResponse::build(self.status_code()).json(envelope)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::NotFoundOrForbidden => AppError::NotFoundOrForbidden,
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::AuthenticationRequired => AppError::Unauthorized,
            DomainError::SignatureInvalid(msg) => AppError::SignatureInvalid(msg),
            DomainError::Upstream(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
