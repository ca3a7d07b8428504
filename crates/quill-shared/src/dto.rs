//! Data Transfer Objects - entity JSON shapes produced by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quill_core::domain::{Favorite, Post, PostWithAuthor, User};

/// A post as serialized to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostJson {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Attached author mirror, present on feed and detail views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserJson>,
}

/// A user mirror as serialized to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJson {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// The avatar URL, named `imageUrl` on the wire to match the identity
    /// provider's payloads.
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A favorite marker as serialized to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteJson {
    pub id: i32,
    pub user_id: String,
    pub post_id: i32,
}

impl From<User> for UserJson {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<Post> for PostJson {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            date: post.date,
            author_id: post.author_id,
            image_url: post.image_url,
            author: None,
        }
    }
}

impl From<PostWithAuthor> for PostJson {
    fn from(joined: PostWithAuthor) -> Self {
        let mut json = PostJson::from(joined.post);
        json.author = joined.author.map(UserJson::from);
        json
    }
}

impl From<Favorite> for FavoriteJson {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.id,
            user_id: favorite.user_id,
            post_id: favorite.post_id,
        }
    }
}
