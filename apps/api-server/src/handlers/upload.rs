//! Media upload handler.
//!
//! Accepts a multipart `file` field plus an optional `postId` field. The
//! file is always stored; binding it to a post is a separate step whose
//! failure is reported alongside the already-usable public URL.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::{StreamExt, TryStreamExt};

use quill_core::media::{BindError, UploadOutcome, UploadedFile};
use quill_shared::ApiMessage;

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/upload - method hint for clients probing the endpoint.
pub async fn upload_hint() -> HttpResponse {
    HttpResponse::Ok().json(ApiMessage::new("Use POST to upload a file"))
}

/// POST /api/upload - store a file, optionally binding it to a post.
pub async fn upload(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut file: Option<UploadedFile> = None;
    let mut post_id: Option<i32> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| AppError::BadRequest(format!("Malformed multipart body: {err}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| {
                AppError::BadRequest(format!("Failed reading field {name}: {err}"))
            })?;
            bytes.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|mime| mime.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let extension = field
                    .content_disposition()
                    .and_then(|disposition| disposition.get_filename())
                    .and_then(|filename| filename.rsplit_once('.'))
                    .map(|(_, ext)| ext.to_string());

                file = Some(UploadedFile {
                    bytes,
                    content_type,
                    extension,
                });
            }
            "postId" => {
                let raw = String::from_utf8_lossy(&bytes).trim().to_string();
                let parsed = raw
                    .parse::<i32>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid postId: {raw}")))?;
                post_id = Some(parsed);
            }
            _ => {}
        }
    }

    let Some(file) = file else {
        return Err(AppError::BadRequest("No file provided".to_string()));
    };

    let requester = identity.0.as_ref().map(|identity| identity.user_id.as_str());
    let outcome = state.media.upload(file, post_id, requester).await?;

    let response = match outcome {
        UploadOutcome::Stored { public_url } => {
            HttpResponse::Created().json(ApiMessage::success().with_public_url(public_url))
        }
        UploadOutcome::Bound { public_url, post } => HttpResponse::Created().json(
            ApiMessage::success()
                .with_public_url(public_url)
                .with_post(post),
        ),
        UploadOutcome::BindFailed {
            public_url,
            error: BindError::NotFoundOrForbidden,
        } => HttpResponse::NotFound().json(
            ApiMessage::new("Post not found or permission denied").with_public_url(public_url),
        ),
        UploadOutcome::BindFailed {
            public_url,
            error: BindError::Upstream(err),
        } => {
            tracing::error!(%err, "post association failed after a completed upload");
            HttpResponse::InternalServerError().json(
                ApiMessage::new("Upload succeeded but post association failed")
                    .with_public_url(public_url)
                    .with_err(err),
            )
        }
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use quill_core::domain::NewPost;
    use quill_core::ports::PostRepository;

    use crate::handlers::test_support::{TestHarness, harness};

    const BOUNDARY: &str = "quill-test-boundary";

    fn file_part(body: &mut Vec<u8>, filename: &str, data: &[u8]) {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    fn text_part(body: &mut Vec<u8>, name: &str, value: &str) {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    fn close(body: &mut Vec<u8>) {
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    }

    fn content_type() -> (&'static str, String) {
        (
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
    }

    async fn seeded_post(harness: &TestHarness, author: &str) -> i32 {
        harness.seed_user(author).await;
        let created = PostRepository::create(
            &harness.db,
            NewPost {
                title: "t".to_string(),
                description: "d".to_string(),
                author_id: author.to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap();
        created.post.id
    }

    #[actix_web::test]
    async fn upload_without_post_id_stores_and_returns_url() {
        let harness = harness();
        let app = test::init_service(harness.app()).await;

        let mut body = Vec::new();
        file_part(&mut body, "photo.PNG", b"pngbytes");
        close(&mut body);

        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(content_type())
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let json: serde_json::Value = test::read_body_json(resp).await;
        let url = json["publicUrl"].as_str().unwrap();
        // Randomized key with the lower-cased original extension.
        assert!(url.ends_with(".png"));
        assert_eq!(harness.store.len().await, 1);
    }

    #[actix_web::test]
    async fn owner_upload_binds_cover_image() {
        let harness = harness();
        let id = seeded_post(&harness, "u1").await;
        let app = test::init_service(harness.app()).await;

        let mut body = Vec::new();
        file_part(&mut body, "cover.jpg", b"jpgbytes");
        text_part(&mut body, "postId", &id.to_string());
        close(&mut body);

        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(content_type())
            .insert_header(harness.bearer("u1"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["post"]["imageUrl"], json["publicUrl"]);
    }

    #[actix_web::test]
    async fn foreign_post_bind_is_conflated_but_upload_survives() {
        let harness = harness();
        let id = seeded_post(&harness, "u1").await;
        harness.seed_user("intruder").await;
        let app = test::init_service(harness.app()).await;

        let mut body = Vec::new();
        file_part(&mut body, "cover.jpg", b"jpgbytes");
        text_part(&mut body, "postId", &id.to_string());
        close(&mut body);

        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(content_type())
            .insert_header(harness.bearer("intruder"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["message"], "Post not found or permission denied");
        // The object is still retrievable despite the failed bind.
        assert!(json["publicUrl"].is_string());
        assert_eq!(harness.store.len().await, 1);

        // And the post was left untouched.
        let post = harness.db.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.post.image_url, None);
    }

    #[actix_web::test]
    async fn bind_without_token_is_unauthorized() {
        let harness = harness();
        let id = seeded_post(&harness, "u1").await;
        let app = test::init_service(harness.app()).await;

        let mut body = Vec::new();
        file_part(&mut body, "cover.jpg", b"jpgbytes");
        text_part(&mut body, "postId", &id.to_string());
        close(&mut body);

        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(content_type())
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn missing_file_field_is_a_bad_request() {
        let harness = harness();
        let app = test::init_service(harness.app()).await;

        let mut body = Vec::new();
        text_part(&mut body, "postId", "1");
        close(&mut body);

        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(content_type())
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["message"], "No file provided");
    }

    #[actix_web::test]
    async fn get_returns_method_hint() {
        let harness = harness();
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::get().uri("/api/upload").to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(json["message"], "Use POST to upload a file");
    }
}
