use async_trait::async_trait;

use crate::domain::{Favorite, NewPost, Post, PostChanges, PostWithAuthor, User, UserProfile};
use crate::error::RepoError;

/// User repository - the local mirror of externally-owned identities.
///
/// Only the webhook consumer (and the backfill migration) writes through
/// this trait; request handlers read at most.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user mirror. Fails with a constraint error when the id
    /// already exists.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Overwrite the profile fields of an existing user and stamp
    /// `updated_at`. Fails with `RepoError::NotFound` when no row matches
    /// the id.
    async fn update_profile(&self, id: &str, profile: UserProfile)
    -> Result<User, RepoError>;

    async fn delete(&self, id: &str) -> Result<(), RepoError>;
}

/// Post repository - the persistence facade for post lifecycle handlers.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch one post with its author attached. The detail view is public,
    /// so there is no requester filter here.
    async fn find_by_id(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError>;

    /// Ownership re-check: fetch a post matching both id and author in a
    /// single query, so a concurrent ownership change cannot slip between
    /// a fetch and an application-side comparison.
    async fn find_by_id_and_author(
        &self,
        id: i32,
        author_id: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// All posts in ascending date order, authors attached (public feed).
    /// Tie-break on equal timestamps is storage order.
    async fn find_all_ordered_by_date(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// The requester's own posts, ascending by date (private listing).
    async fn find_all_by_author(&self, author_id: &str) -> Result<Vec<Post>, RepoError>;

    /// Persist a new post and return it with its author attached.
    async fn create(&self, post: NewPost) -> Result<PostWithAuthor, RepoError>;

    /// Apply a partial update. `changes.image_url == None` leaves the
    /// stored cover image untouched.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError>;

    /// Overwrite only the cover image URL (media attachment bind).
    async fn set_image_url(&self, id: i32, image_url: &str) -> Result<Post, RepoError>;

    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Favorite repository - keyed by the `(user_id, post_id)` pair.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn find(&self, user_id: &str, post_id: i32)
    -> Result<Option<Favorite>, RepoError>;

    async fn create(&self, user_id: &str, post_id: i32) -> Result<Favorite, RepoError>;

    /// Delete every row matching the pair. Deleting a non-existent pair is
    /// a successful no-op.
    async fn delete_all(&self, user_id: &str, post_id: i32) -> Result<(), RepoError>;
}
