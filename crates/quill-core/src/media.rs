//! Media attachment flow.
//!
//! Accepts an uploaded file, stores it under a collision-resistant key, and
//! optionally binds the resulting public URL to a post after an independent
//! ownership re-check. A failed bind never rolls back the completed upload;
//! the caller is told the upload succeeded but the association failed.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{ObjectStore, PostRepository};

/// A file received at the transport boundary. The handler has already
/// rejected non-multipart requests and missing files.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
    /// Extension of the original filename, without the dot.
    pub extension: Option<String>,
}

/// Why binding the uploaded URL to a post failed.
#[derive(Debug, Clone)]
pub enum BindError {
    /// The post does not exist or belongs to someone else (conflated).
    NotFoundOrForbidden,
    Upstream(String),
}

/// Result of an upload, including the explicit partial-failure case.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// No post id was supplied; binding is the caller's responsibility.
    Stored { public_url: String },
    /// Uploaded and bound to the requester's post.
    Bound { public_url: String, post: Post },
    /// Uploaded, but the association failed. The object stays retrievable
    /// at the returned URL and the post is unchanged.
    BindFailed {
        public_url: String,
        error: BindError,
    },
}

/// Orchestrates upload-then-bind against the object store and the post
/// repository.
pub struct MediaService {
    store: Arc<dyn ObjectStore>,
    posts: Arc<dyn PostRepository>,
    bucket: String,
}

impl MediaService {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        posts: Arc<dyn PostRepository>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            store,
            posts,
            bucket: bucket.into(),
        }
    }

    /// Generate a randomized, globally-unique storage key. The original
    /// extension is appended lower-cased; without one the separator is
    /// omitted.
    pub fn storage_key(extension: Option<&str>) -> String {
        let id = Uuid::new_v4();
        match extension.filter(|ext| !ext.is_empty()) {
            Some(ext) => format!("{id}.{}", ext.to_lowercase()),
            None => id.to_string(),
        }
    }

    /// Upload a file; when `post_id` is supplied, re-check ownership and
    /// bind the public URL to the post's cover image.
    pub async fn upload(
        &self,
        file: UploadedFile,
        post_id: Option<i32>,
        requester: Option<&str>,
    ) -> Result<UploadOutcome, DomainError> {
        let key = Self::storage_key(file.extension.as_deref());

        // Upsert stays disabled: a key collision is a hard failure, made
        // astronomically unlikely by the randomized key.
        let path = self
            .store
            .upload(&self.bucket, &key, file.bytes, &file.content_type, false)
            .await
            .map_err(|err| DomainError::Upstream(err.to_string()))?;

        let public_url = self.store.public_url(&self.bucket, &path);
        tracing::info!(%public_url, "object uploaded");

        let Some(post_id) = post_id else {
            return Ok(UploadOutcome::Stored { public_url });
        };

        // Binding requires a resolved identity; the upload above is
        // intentionally left in place either way.
        let requester = requester.ok_or(DomainError::AuthenticationRequired)?;

        match self.posts.find_by_id_and_author(post_id, requester).await {
            Ok(Some(_)) => match self.posts.set_image_url(post_id, &public_url).await {
                Ok(post) => Ok(UploadOutcome::Bound { public_url, post }),
                Err(err) => Ok(UploadOutcome::BindFailed {
                    public_url,
                    error: BindError::Upstream(err.to_string()),
                }),
            },
            Ok(None) => Ok(UploadOutcome::BindFailed {
                public_url,
                error: BindError::NotFoundOrForbidden,
            }),
            Err(err) => Ok(UploadOutcome::BindFailed {
                public_url,
                error: BindError::Upstream(err.to_string()),
            }),
        }
    }
}
