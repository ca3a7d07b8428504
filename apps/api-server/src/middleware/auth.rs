//! Authentication extractors.
//!
//! The identity provider mints the tokens; this layer only validates them
//! and exposes the resolved user id to handlers.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use quill_core::ports::AuthError;
use quill_shared::ApiMessage;

use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    /// The identity provider's user id.
    pub user_id: String,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let envelope = match &self.0 {
            AuthError::TokenExpired => ApiMessage::new("Authentication required")
                .with_err("Token expired. Please sign in again."),
            AuthError::InvalidToken(msg) => {
                ApiMessage::new("Authentication required").with_err(msg.clone())
            }
            AuthError::MissingAuth => ApiMessage::new("Authentication required"),
            other => ApiMessage::new("Authentication required").with_err(other.to_string()),
        };

        actix_web::HttpResponse::build(self.status_code()).json(envelope)
    }
}

fn resolve_identity(req: &HttpRequest) -> Result<Identity, AuthenticationError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| {
            tracing::error!("AppState not found in app data");
            AuthenticationError(AuthError::InvalidToken(
                "Server configuration error".to_string(),
            ))
        })?;

    // Extract Bearer token from Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthenticationError(AuthError::MissingAuth))?;

    let auth_str = auth_header.to_str().map_err(|_| {
        AuthenticationError(AuthError::InvalidToken(
            "Invalid authorization header".to_string(),
        ))
    })?;

    // Parse "Bearer <token>"
    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        AuthenticationError(AuthError::InvalidToken(
            "Expected Bearer token".to_string(),
        ))
    })?;

    let claims = state
        .tokens
        .validate_token(token)
        .map_err(AuthenticationError)?;

    Ok(Identity {
        user_id: claims.user_id,
    })
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_identity(req))
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(resolve_identity(req).ok())))
    }
}
