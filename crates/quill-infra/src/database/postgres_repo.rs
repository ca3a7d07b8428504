//! PostgreSQL repository implementations.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use quill_core::domain::{
    Favorite, NewPost, Post, PostChanges, PostWithAuthor, User, UserProfile,
};
use quill_core::error::RepoError;
use quill_core::ports::{FavoriteRepository, PostRepository, UserRepository};

use super::entity::favorite::{self, Entity as FavoriteEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

/// Generic PostgreSQL repository carrier. The domain traits are implemented
/// per entity on the aliases below.
pub struct PostgresRepository<E>
where
    E: EntityTrait,
{
    db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresRepository<PostEntity>;

/// PostgreSQL favorite repository.
pub type PostgresFavoriteRepository = PostgresRepository<FavoriteEntity>;

fn query_err(err: DbErr) -> RepoError {
    RepoError::Query(err.to_string())
}

fn insert_err(err: DbErr) -> RepoError {
    let err_str = err.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

fn update_err(err: DbErr) -> RepoError {
    match err {
        DbErr::RecordNotUpdated => RepoError::NotFound,
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(insert_err)?;

        Ok(model.into())
    }

    async fn update_profile(
        &self,
        id: &str,
        profile: UserProfile,
    ) -> Result<User, RepoError> {
        let active = user::ActiveModel {
            id: Set(id.to_string()),
            email: Set(profile.email),
            first_name: Set(profile.first_name),
            last_name: Set(profile.last_name),
            avatar_url: Set(profile.avatar_url),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active.update(&self.db).await.map_err(update_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(|(post, author)| PostWithAuthor {
            post: post.into(),
            author: author.map(Into::into),
        }))
    }

    async fn find_by_id_and_author(
        &self,
        id: i32,
        author_id: &str,
    ) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::AuthorId.eq(author_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all_ordered_by_date(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Date)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result
            .into_iter()
            .map(|(post, author)| PostWithAuthor {
                post: post.into(),
                author: author.map(Into::into),
            })
            .collect())
    }

    async fn find_all_by_author(&self, author_id: &str) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_asc(post::Column::Date)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new_post: NewPost) -> Result<PostWithAuthor, RepoError> {
        let author_id = new_post.author_id.clone();

        let active = post::ActiveModel {
            title: Set(new_post.title),
            description: Set(new_post.description),
            date: Set(Utc::now().into()),
            author_id: Set(Some(new_post.author_id)),
            image_url: Set(new_post.image_url),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(insert_err)?;

        let author = UserEntity::find_by_id(author_id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(PostWithAuthor {
            post: model.into(),
            author: author.map(Into::into),
        })
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let mut active = post::ActiveModel {
            id: Set(id),
            title: Set(changes.title),
            description: Set(changes.description),
            ..Default::default()
        };

        // A new non-empty value overwrites the cover image; anything else
        // leaves the stored value untouched.
        if let Some(image_url) = changes.image_url.filter(|url| !url.is_empty()) {
            active.image_url = Set(Some(image_url));
        }

        let model = active.update(&self.db).await.map_err(update_err)?;

        Ok(model.into())
    }

    async fn set_image_url(&self, id: i32, image_url: &str) -> Result<Post, RepoError> {
        let active = post::ActiveModel {
            id: Set(id),
            image_url: Set(Some(image_url.to_string())),
            ..Default::default()
        };

        let model = active.update(&self.db).await.map_err(update_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn find(
        &self,
        user_id: &str,
        post_id: i32,
    ) -> Result<Option<Favorite>, RepoError> {
        let result = FavoriteEntity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, user_id: &str, post_id: i32) -> Result<Favorite, RepoError> {
        let active = favorite::ActiveModel {
            user_id: Set(user_id.to_string()),
            post_id: Set(post_id),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(insert_err)?;

        Ok(model.into())
    }

    async fn delete_all(&self, user_id: &str, post_id: i32) -> Result<(), RepoError> {
        // Zero affected rows is a successful no-op.
        FavoriteEntity::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(())
    }
}
