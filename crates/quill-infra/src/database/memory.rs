//! In-memory repositories - used as fallback when the database is not
//! configured, and as the backing store in handler tests.
//!
//! Note: Data is lost on process restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{
    Favorite, NewPost, Post, PostChanges, PostWithAuthor, User, UserProfile,
};
use quill_core::error::RepoError;
use quill_core::ports::{FavoriteRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    posts: BTreeMap<i32, Post>,
    favorites: Vec<Favorite>,
    next_post_id: i32,
    next_favorite_id: i32,
}

/// Shared in-memory tables implementing all three repository traits.
///
/// A single instance is cloned behind `Arc` so the user, post, and favorite
/// views stay consistent with each other (author joins work).
#[derive(Clone, Default)]
pub struct InMemoryState {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryState {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(&user.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        inner.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: &str,
        profile: UserProfile,
    ) -> Result<User, RepoError> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(id).ok_or(RepoError::NotFound)?;
        user.apply_profile(profile);
        Ok(user.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        inner.users.remove(id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

impl Inner {
    fn with_author(&self, post: Post) -> PostWithAuthor {
        let author = post
            .author_id
            .as_deref()
            .and_then(|id| self.users.get(id))
            .cloned();
        PostWithAuthor { post, author }
    }

    fn posts_ordered_by_date(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().cloned().collect();
        // Stable sort keeps storage order on equal timestamps.
        posts.sort_by_key(|post| post.date);
        posts
    }
}

#[async_trait]
impl PostRepository for InMemoryState {
    async fn find_by_id(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .get(&id)
            .cloned()
            .map(|post| inner.with_author(post)))
    }

    async fn find_by_id_and_author(
        &self,
        id: i32,
        author_id: &str,
    ) -> Result<Option<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .get(&id)
            .filter(|post| post.author_id.as_deref() == Some(author_id))
            .cloned())
    }

    async fn find_all_ordered_by_date(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts_ordered_by_date()
            .into_iter()
            .map(|post| inner.with_author(post))
            .collect())
    }

    async fn find_all_by_author(&self, author_id: &str) -> Result<Vec<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts_ordered_by_date()
            .into_iter()
            .filter(|post| post.author_id.as_deref() == Some(author_id))
            .collect())
    }

    async fn create(&self, new_post: NewPost) -> Result<PostWithAuthor, RepoError> {
        let mut inner = self.inner.write().await;
        inner.next_post_id += 1;
        let post = Post {
            id: inner.next_post_id,
            title: new_post.title,
            description: new_post.description,
            date: Utc::now(),
            author_id: Some(new_post.author_id),
            image_url: new_post.image_url,
        };
        inner.posts.insert(post.id, post.clone());
        Ok(inner.with_author(post))
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.title = changes.title;
        post.description = changes.description;
        if let Some(image_url) = changes.image_url.filter(|url| !url.is_empty()) {
            post.image_url = Some(image_url);
        }
        Ok(post.clone())
    }

    async fn set_image_url(&self, id: i32, image_url: &str) -> Result<Post, RepoError> {
        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.image_url = Some(image_url.to_string());
        Ok(post.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        inner.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryState {
    async fn find(
        &self,
        user_id: &str,
        post_id: i32,
    ) -> Result<Option<Favorite>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .favorites
            .iter()
            .find(|fav| fav.user_id == user_id && fav.post_id == post_id)
            .cloned())
    }

    async fn create(&self, user_id: &str, post_id: i32) -> Result<Favorite, RepoError> {
        let mut inner = self.inner.write().await;
        inner.next_favorite_id += 1;
        let favorite = Favorite {
            id: inner.next_favorite_id,
            user_id: user_id.to_string(),
            post_id,
        };
        inner.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn delete_all(&self, user_id: &str, post_id: i32) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        inner
            .favorites
            .retain(|fav| !(fav.user_id == user_id && fav.post_id == post_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn new_post(author: &str, title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            description: "body".to_string(),
            author_id: author.to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_monotonic_ids() {
        let state = InMemoryState::new();
        let first = PostRepository::create(&state, new_post("u1", "one"))
            .await
            .unwrap();
        let second = PostRepository::create(&state, new_post("u1", "two"))
            .await
            .unwrap();
        assert!(second.post.id > first.post.id);
    }

    #[tokio::test]
    async fn author_filter_scopes_the_private_listing() {
        let state = InMemoryState::new();
        PostRepository::create(&state, new_post("u1", "mine"))
            .await
            .unwrap();
        PostRepository::create(&state, new_post("u2", "theirs"))
            .await
            .unwrap();

        let mine = state.find_all_by_author("u1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "mine");
    }

    #[tokio::test]
    async fn listings_come_back_in_ascending_date_order() {
        let state = InMemoryState::new();
        let base = Utc::now();
        // Seed with dates out of chronological order so insertion order
        // cannot mask a broken sort.
        let dates = [base + Duration::days(2), base, base + Duration::days(1)];
        {
            let mut inner = state.inner.write().await;
            for (offset, date) in dates.iter().enumerate() {
                let id = offset as i32 + 1;
                inner.posts.insert(
                    id,
                    Post {
                        id,
                        title: format!("post {id}"),
                        description: "body".to_string(),
                        date: *date,
                        author_id: Some("u1".to_string()),
                        image_url: None,
                    },
                );
            }
            inner.next_post_id = dates.len() as i32;
        }

        let feed = state.find_all_ordered_by_date().await.unwrap();
        let feed_dates: Vec<_> = feed.iter().map(|entry| entry.post.date).collect();
        assert_eq!(
            feed_dates,
            vec![base, base + Duration::days(1), base + Duration::days(2)]
        );

        let mine = state.find_all_by_author("u1").await.unwrap();
        assert!(mine.windows(2).all(|pair| pair[0].date <= pair[1].date));
    }

    #[tokio::test]
    async fn favorite_remove_is_a_noop_without_a_pair() {
        let state = InMemoryState::new();
        assert!(FavoriteRepository::delete_all(&state, "u1", 42).await.is_ok());
    }

    #[tokio::test]
    async fn update_keeps_image_url_unless_replaced() {
        let state = InMemoryState::new();
        let created = PostRepository::create(
            &state,
            NewPost {
                image_url: Some("https://example.com/a.png".to_string()),
                ..new_post("u1", "cover")
            },
        )
        .await
        .unwrap();

        let updated = PostRepository::update(
            &state,
            created.post.id,
            PostChanges {
                title: "cover 2".to_string(),
                description: "body 2".to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(
            updated.image_url.as_deref(),
            Some("https://example.com/a.png")
        );
    }
}
