use serde::{Deserialize, Serialize};

/// Favorite entity - a many-to-many marker between a user and a post.
///
/// At most one row is intended per `(user_id, post_id)` pair; creation is
/// idempotent and removal deletes every matching row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i32,
    pub user_id: String,
    pub post_id: i32,
}
