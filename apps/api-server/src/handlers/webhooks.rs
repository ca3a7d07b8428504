//! Identity provider webhook endpoint.
//!
//! The raw body is captured before any parsing: the signature covers the
//! exact bytes on the wire, and an unverified payload is never
//! deserialized.

use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::webhook::{SyncOutcome, UserEvent};
use quill_shared::ApiMessage;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn header<'r>(req: &'r HttpRequest, name: &str) -> Option<&'r str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

/// POST /api/webhooks/clerk - consume a signed user lifecycle event.
pub async fn receive(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let Some(verifier) = state.verifier.as_ref() else {
        return Err(AppError::Internal(
            "Webhook secret not configured".to_string(),
        ));
    };

    let (Some(event_id), Some(timestamp), Some(signature)) = (
        header(&req, "svix-id"),
        header(&req, "svix-timestamp"),
        header(&req, "svix-signature"),
    ) else {
        return Err(AppError::BadRequest("Missing svix headers".to_string()));
    };

    verifier
        .verify(event_id, timestamp, signature, &body)
        .map_err(|err| AppError::SignatureInvalid(err.to_string()))?;

    let event: UserEvent = serde_json::from_slice(&body)
        .map_err(|err| AppError::BadRequest(format!("Malformed event payload: {err}")))?;

    let outcome = state.user_sync.apply(event).await?;

    let envelope = match outcome {
        SyncOutcome::Created(user) => {
            ApiMessage::new("User created successfully").with_user(user)
        }
        SyncOutcome::Updated(user) => {
            ApiMessage::new("User updated successfully").with_user(user)
        }
        SyncOutcome::Deleted(_) => ApiMessage::new("User deleted successfully"),
        SyncOutcome::Ignored(_) => ApiMessage::new("Event type not handled"),
    };

    Ok(HttpResponse::Ok().json(envelope))
}
