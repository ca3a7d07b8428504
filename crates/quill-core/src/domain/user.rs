use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - a local mirror of an externally-owned identity.
///
/// The id equals the identity provider's id and is never generated locally.
/// Rows are written only by the webhook consumer (and the one-time
/// placeholder-user backfill); post handlers treat users as read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields delivered by an identity lifecycle event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl User {
    /// Create a user mirror from an external id and profile.
    pub fn from_profile(id: String, profile: UserProfile) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            avatar_url: profile.avatar_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable profile fields and stamp `updated_at`.
    pub fn apply_profile(&mut self, profile: UserProfile) {
        self.email = profile.email;
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.avatar_url = profile.avatar_url;
        self.updated_at = Utc::now();
    }
}
