//! Identity event consumption.
//!
//! The identity provider emits signed lifecycle events for user accounts.
//! After the transport layer has verified the envelope signature (see
//! [`crate::ports::WebhookVerifier`]), the event is dispatched here and the
//! local user mirror is updated. This consumer is the sole writer of the
//! user table outside the one-time backfill migration.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{FieldErrors, User, UserProfile};
use crate::error::{DomainError, RepoError};
use crate::ports::UserRepository;

/// A deserialized identity lifecycle event.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: UserEventData,
}

/// Event payload. Every field is optional at the wire level; which ones are
/// required depends on the event kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEventData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UserEventData {
    fn into_profile(self) -> UserProfile {
        UserProfile {
            email: self.email.unwrap_or_default(),
            first_name: self.first_name,
            last_name: self.last_name,
            avatar_url: self.image_url,
        }
    }
}

/// What a successfully processed event did to local storage.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    Created(User),
    Updated(User),
    Deleted(String),
    /// Unrecognized event types are accepted without mutation.
    Ignored(String),
}

/// Applies identity lifecycle events to the local user mirror.
pub struct UserSync {
    users: Arc<dyn UserRepository>,
}

impl UserSync {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Dispatch a verified event by kind and mutate the user mirror.
    pub async fn apply(&self, event: UserEvent) -> Result<SyncOutcome, DomainError> {
        match event.kind.as_str() {
            "user.created" => {
                let id = require_id(event.data.id.clone())?;
                let user = User::from_profile(id, event.data.into_profile());
                let created = self.users.insert(user).await?;
                tracing::info!(user_id = %created.id, "user mirror created");
                Ok(SyncOutcome::Created(created))
            }
            "user.updated" => {
                let id = require_id(event.data.id.clone())?;
                let updated = self
                    .users
                    .update_profile(&id, event.data.into_profile())
                    .await
                    .map_err(|err| match err {
                        // A mirror row missing for a known identity is a
                        // data-integrity problem to surface, not to swallow.
                        RepoError::NotFound => DomainError::Upstream(format!(
                            "no user row to update for id {id}"
                        )),
                        other => other.into(),
                    })?;
                tracing::info!(user_id = %updated.id, "user mirror updated");
                Ok(SyncOutcome::Updated(updated))
            }
            "user.deleted" => {
                let id = require_id(event.data.id.clone())?;
                self.users.delete(&id).await?;
                tracing::info!(user_id = %id, "user mirror deleted");
                Ok(SyncOutcome::Deleted(id))
            }
            other => {
                tracing::debug!(event_type = %other, "unhandled webhook event type");
                Ok(SyncOutcome::Ignored(other.to_string()))
            }
        }
    }
}

fn require_id(id: Option<String>) -> Result<String, DomainError> {
    id.filter(|id| !id.is_empty()).ok_or_else(|| {
        let mut errors = FieldErrors::new();
        errors.insert("id", "User id missing from event payload".to_string());
        DomainError::Validation(errors)
    })
}
