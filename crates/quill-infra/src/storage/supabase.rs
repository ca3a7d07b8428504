//! Supabase-style object storage over HTTP.
//!
//! Uploads go to `POST {base}/storage/v1/object/{bucket}/{key}` with a
//! service-role bearer token; public URLs resolve under
//! `{base}/storage/v1/object/public/{bucket}/{path}`.

use async_trait::async_trait;

use quill_core::ports::{ObjectStore, ObjectStoreError};

/// Storage provider configuration.
#[derive(Debug, Clone)]
pub struct SupabaseStorageConfig {
    /// Project base URL, without a trailing slash.
    pub base_url: String,
    /// Service-role key, required for writes.
    pub service_key: String,
}

/// HTTP client for a Supabase-compatible storage API.
pub struct SupabaseStorage {
    http: reqwest::Client,
    config: SupabaseStorageConfig,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseStorageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{bucket}/{key}",
            self.config.base_url
        )
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<String, ObjectStoreError> {
        let response = self
            .http
            .post(self.object_url(bucket, key))
            .bearer_auth(&self.config.service_key)
            .header("content-type", content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes)
            .send()
            .await
            .map_err(|err| ObjectStoreError::Request(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(ObjectStoreError::Conflict);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "storage provider rejected upload");
            return Err(ObjectStoreError::Provider(format!("{status}: {body}")));
        }

        Ok(key.to_string())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{path}",
            self.config.base_url
        )
    }
}
