//! Favorite handlers - idempotent add and tolerant remove, keyed by the
//! `(user, post)` pair.

use actix_web::{HttpResponse, web};

use quill_shared::ApiMessage;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/blog/{id}/favorite - mark a post as a favorite. Repeating the
/// call acknowledges the existing marker instead of failing.
pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    if let Some(existing) = state
        .favorites
        .find(&identity.user_id, post_id)
        .await?
    {
        tracing::debug!(favorite_id = existing.id, "favorite already present");
        return Ok(HttpResponse::Ok().json(ApiMessage::new("Already favorited")));
    }

    let favorite = state.favorites.create(&identity.user_id, post_id).await?;

    Ok(HttpResponse::Created().json(ApiMessage::success().with_favorite(favorite)))
}

/// DELETE /api/blog/{id}/favorite - remove the requester's favorite marker.
/// Removing an absent marker succeeds.
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    state
        .favorites
        .delete_all(&identity.user_id, post_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiMessage::success()))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use quill_core::domain::NewPost;
    use quill_core::ports::{FavoriteRepository, PostRepository};

    use crate::handlers::test_support::{TestHarness, harness};

    async fn seeded_post(harness: &TestHarness) -> i32 {
        harness.seed_user("u1").await;
        let created = PostRepository::create(
            &harness.db,
            NewPost {
                title: "t".to_string(),
                description: "d".to_string(),
                author_id: "u1".to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap();
        created.post.id
    }

    #[actix_web::test]
    async fn add_is_idempotent() {
        let harness = harness();
        let app = test::init_service(harness.app()).await;
        let id = seeded_post(&harness).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/blog/{id}/favorite"))
            .insert_header(harness.bearer("u1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["favorite"]["postId"], id);
        assert_eq!(body["favorite"]["userId"], "u1");

        // Second call: acknowledged, no duplicate row.
        let req = test::TestRequest::post()
            .uri(&format!("/api/blog/{id}/favorite"))
            .insert_header(harness.bearer("u1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Already favorited");
    }

    #[actix_web::test]
    async fn remove_deletes_the_marker() {
        let harness = harness();
        let app = test::init_service(harness.app()).await;
        let id = seeded_post(&harness).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/blog/{id}/favorite"))
            .insert_header(harness.bearer("u1"))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/blog/{id}/favorite"))
            .insert_header(harness.bearer("u1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        assert!(harness.db.find("u1", id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn remove_of_absent_marker_succeeds() {
        let harness = harness();
        harness.seed_user("u1").await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::delete()
            .uri("/api/blog/123/favorite")
            .insert_header(harness.bearer("u1"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Success");
    }

    #[actix_web::test]
    async fn favorites_require_authentication() {
        let harness = harness();
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/blog/1/favorite")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
