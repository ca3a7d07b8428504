//! In-memory object store - used as fallback when no storage provider is
//! configured, and in tests.
//!
//! Note: Objects are lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::{ObjectStore, ObjectStoreError};

struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory object store keyed by `bucket/key`.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an object exists under `bucket`/`path`.
    pub async fn contains(&self, bucket: &str, path: &str) -> bool {
        self.objects
            .read()
            .await
            .contains_key(&full_key(bucket, path))
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn full_key(bucket: &str, path: &str) -> String {
    format!("{bucket}/{path}")
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<String, ObjectStoreError> {
        let mut objects = self.objects.write().await;
        let full = full_key(bucket, key);

        if !upsert && objects.contains_key(&full) {
            return Err(ObjectStoreError::Conflict);
        }

        objects.insert(
            full,
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );

        Ok(key.to_string())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{bucket}/{path}")
    }
}
