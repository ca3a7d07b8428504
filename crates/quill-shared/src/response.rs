//! The single response envelope used by every handler.
//!
//! One shape throughout: `{message, post?, posts?, favorite?, user?,
//! publicUrl?, errors?, err?}`. Fields absent from a given response are
//! omitted from the JSON entirely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dto::{FavoriteJson, PostJson, UserJson};

/// Field name -> message, as serialized in validation failures.
pub type FieldErrorMap = BTreeMap<String, String>;

/// Response envelope paired with an HTTP status by the handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostJson>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<PostJson>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<FavoriteJson>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserJson>,

    #[serde(rename = "publicUrl", skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,

    /// Per-field validation failures, first message per field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrorMap>,

    /// Raw upstream error text, echoed for operator visibility only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            post: None,
            posts: None,
            favorite: None,
            user: None,
            public_url: None,
            errors: None,
            err: None,
        }
    }

    pub fn success() -> Self {
        Self::new("Success")
    }

    pub fn with_post(mut self, post: impl Into<PostJson>) -> Self {
        self.post = Some(post.into());
        self
    }

    pub fn with_posts(mut self, posts: Vec<PostJson>) -> Self {
        self.posts = Some(posts);
        self
    }

    pub fn with_favorite(mut self, favorite: impl Into<FavoriteJson>) -> Self {
        self.favorite = Some(favorite.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<UserJson>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = Some(url.into());
        self
    }

    pub fn with_errors(mut self, errors: FieldErrorMap) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_err(mut self, err: impl Into<String>) -> Self {
        self.err = Some(err.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_absent_fields() {
        let json = serde_json::to_value(ApiMessage::success()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["message"], "Success");
    }

    #[test]
    fn serializes_errors_map() {
        let mut errors = FieldErrorMap::new();
        errors.insert("title".to_string(), "Title is required".to_string());

        let json =
            serde_json::to_value(ApiMessage::new("Validation failed").with_errors(errors))
                .unwrap();
        assert_eq!(json["errors"]["title"], "Title is required");
    }
}
