use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Post entity - a unit of blog content.
///
/// `author_id` is `None` only for legacy rows that predate authorship and
/// have not yet been backfilled by the maintenance migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub author_id: Option<String>,
    pub image_url: Option<String>,
}

/// Fields required to persist a new post. The id is storage-generated.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub author_id: String,
    pub image_url: Option<String>,
}

/// Partial update applied to an existing post.
///
/// `image_url` is only overwritten when a new non-empty value is supplied;
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// A post joined with its author's mirror record, for listing and detail
/// views that attach author info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<User>,
}
