//! Object storage port - binary blobs behind a hosted provider.

use async_trait::async_trait;

/// Object storage provider.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` under `bucket`/`key` and return the stored path.
    ///
    /// With `upsert` disabled a key collision is a hard failure; keys are
    /// randomized, so collisions are not specially handled upstream.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<String, ObjectStoreError>;

    /// Resolve the publicly retrievable URL for a stored path.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Object storage errors.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("Object already exists at key")]
    Conflict,

    #[error("Provider rejected the upload: {0}")]
    Provider(String),

    #[error("Request failed: {0}")]
    Request(String),
}
