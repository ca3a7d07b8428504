//! Post lifecycle handlers: feed, private listing, create, read, update,
//! delete.

use actix_web::{HttpResponse, web};

use quill_core::domain::{NewPost, PostChanges, PostInput, validate_post_input};
use quill_shared::ApiMessage;
use quill_shared::dto::PostJson;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/blog/public - the public feed, ascending by date, authors
/// attached. No authentication.
pub async fn list_public(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all_ordered_by_date().await?;
    let posts: Vec<PostJson> = posts.into_iter().map(PostJson::from).collect();

    Ok(HttpResponse::Ok().json(ApiMessage::success().with_posts(posts)))
}

/// GET /api/blog - the requester's own posts, ascending by date.
pub async fn list_mine(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all_by_author(&identity.user_id).await?;
    let posts: Vec<PostJson> = posts.into_iter().map(PostJson::from).collect();

    Ok(HttpResponse::Ok().json(ApiMessage::success().with_posts(posts)))
}

/// POST /api/blog - create a post owned by the requester.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    validate_post_input(&input).map_err(AppError::Validation)?;

    let created = state
        .posts
        .create(NewPost {
            title: input.title,
            description: input.description,
            author_id: identity.user_id,
            image_url: input.image_url.filter(|url| !url.is_empty()),
        })
        .await?;

    tracing::info!(post_id = created.post.id, "post created");

    Ok(HttpResponse::Created().json(ApiMessage::success().with_post(created)))
}

/// GET /api/blog/{id} - public detail view with the author attached.
pub async fn read(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.find_by_id(id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(ApiMessage::success().with_post(post))),
        None => Err(AppError::NotFound(format!("Post {id} not found"))),
    }
}

/// PUT /api/blog/{id} - full-field update of the requester's own post.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let input = body.into_inner();
    validate_post_input(&input).map_err(AppError::Validation)?;

    // Ownership re-check in a single combined query; the response does not
    // reveal whether the post exists at all.
    state
        .posts
        .find_by_id_and_author(id, &identity.user_id)
        .await?
        .ok_or(AppError::NotFoundOrForbidden)?;

    let updated = state
        .posts
        .update(
            id,
            PostChanges {
                title: input.title,
                description: input.description,
                image_url: input.image_url.filter(|url| !url.is_empty()),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiMessage::success().with_post(updated)))
}

/// DELETE /api/blog/{id} - delete the requester's own post.
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state
        .posts
        .find_by_id_and_author(id, &identity.user_id)
        .await?
        .ok_or(AppError::NotFoundOrForbidden)?;

    state.posts.delete(id).await?;
    tracing::info!(post_id = id, "post deleted");

    Ok(HttpResponse::Ok().json(ApiMessage::success()))
}
