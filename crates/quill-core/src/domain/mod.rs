//! Domain entities - the core business objects.

mod access;
mod favorite;
mod post;
mod staleness;
mod user;
mod validation;

pub use access::{Operation, can_access};
pub use favorite::Favorite;
pub use post::{NewPost, Post, PostChanges, PostWithAuthor};
/// Client-facing guard for overlapping list fetches; callers that consume the
/// API apply it to their own requests, the server never issues sequences.
pub use staleness::LoadSequence;
pub use user::{User, UserProfile};
pub use validation::{
    DESCRIPTION_MAX_LEN, FieldErrors, PostInput, TITLE_MAX_LEN, validate_post_input,
};
