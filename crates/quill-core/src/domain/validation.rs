//! Post input validation.
//!
//! The complete rule set: title 1-100 characters, description 1-5000
//! characters, image URL (when supplied) must parse as an absolute URL.
//! Violations are collected into a field -> message map and never reach
//! storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maximum accepted title length, in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// Maximum accepted description length, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 5000;

/// Field name -> first failure message for that field.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// User-supplied post fields, shared by create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Validate a post input against the length and URL rules.
///
/// Returns the offending fields on failure; the first message per field
/// wins. Character counts use scalar values, not bytes, so multi-byte
/// titles are measured the way users count them.
pub fn validate_post_input(input: &PostInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let title_len = input.title.chars().count();
    if title_len == 0 {
        errors.insert("title", "Title is required".to_string());
    } else if title_len > TITLE_MAX_LEN {
        errors.insert(
            "title",
            format!("Title must be at most {TITLE_MAX_LEN} characters"),
        );
    }

    let description_len = input.description.chars().count();
    if description_len == 0 {
        errors.insert("description", "Description is required".to_string());
    } else if description_len > DESCRIPTION_MAX_LEN {
        errors.insert(
            "description",
            format!("Description must be at most {DESCRIPTION_MAX_LEN} characters"),
        );
    }

    if let Some(image_url) = input.image_url.as_deref() {
        if !image_url.is_empty() && url::Url::parse(image_url).is_err() {
            errors.insert("imageUrl", "Image URL must be a valid URL".to_string());
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, description: &str) -> PostInput {
        PostInput {
            title: title.to_string(),
            description: description.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn accepts_bounds() {
        assert!(validate_post_input(&input("a", "b")).is_ok());
        assert!(
            validate_post_input(&input(&"t".repeat(100), &"d".repeat(5000))).is_ok()
        );
    }

    #[test]
    fn rejects_empty_title() {
        let errors = validate_post_input(&input("", "body")).unwrap_err();
        assert!(errors.contains_key("title"));
        assert!(!errors.contains_key("description"));
    }

    #[test]
    fn rejects_oversized_title() {
        let errors = validate_post_input(&input(&"t".repeat(101), "body")).unwrap_err();
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn rejects_oversized_description() {
        let errors =
            validate_post_input(&input("title", &"d".repeat(5001))).unwrap_err();
        assert!(errors.contains_key("description"));
    }

    #[test]
    fn collects_every_offending_field() {
        let errors = validate_post_input(&input("", "")).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn rejects_malformed_image_url() {
        let mut bad = input("title", "body");
        bad.image_url = Some("not a url".to_string());
        let errors = validate_post_input(&bad).unwrap_err();
        assert!(errors.contains_key("imageUrl"));

        let mut good = input("title", "body");
        good.image_url = Some("https://example.com/cover.png".to_string());
        assert!(validate_post_input(&good).is_ok());
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 100 multi-byte characters are within bounds even though the byte
        // length exceeds 100.
        let title = "あ".repeat(100);
        assert!(validate_post_input(&input(&title, "body")).is_ok());
    }
}
