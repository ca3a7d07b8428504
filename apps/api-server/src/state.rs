//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::media::MediaService;
use quill_core::ports::{
    FavoriteRepository, ObjectStore, PostRepository, TokenService, UserRepository,
    WebhookVerifier,
};
use quill_core::webhook::UserSync;
use quill_infra::auth::{JwtTokenService, SharedSecretVerifier};
use quill_infra::database::InMemoryState;
use quill_infra::storage::InMemoryObjectStore;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub media: Arc<MediaService>,
    pub tokens: Arc<dyn TokenService>,
    pub verifier: Option<Arc<dyn WebhookVerifier>>,
    pub user_sync: Arc<UserSync>,
}

type Repos = (
    Arc<dyn UserRepository>,
    Arc<dyn PostRepository>,
    Arc<dyn FavoriteRepository>,
);

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());

        let verifier: Option<Arc<dyn WebhookVerifier>> = match &config.webhook_secret {
            Some(secret) => match SharedSecretVerifier::new(secret) {
                Ok(verifier) => Some(Arc::new(verifier)),
                Err(e) => {
                    tracing::error!("Invalid WEBHOOK_SECRET: {e}. Webhooks disabled.");
                    None
                }
            },
            None => {
                tracing::warn!("WEBHOOK_SECRET not set. Webhook endpoint disabled.");
                None
            }
        };

        #[cfg(feature = "postgres")]
        let (users, posts, favorites): Repos = {
            if let Some(db_config) = &config.database {
                match quill_infra::database::connect(db_config).await {
                    Ok(conn) => (
                        Arc::new(quill_infra::database::PostgresUserRepository::new(
                            conn.clone(),
                        )),
                        Arc::new(quill_infra::database::PostgresPostRepository::new(
                            conn.clone(),
                        )),
                        Arc::new(quill_infra::database::PostgresFavoriteRepository::new(
                            conn,
                        )),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Self::memory_repos()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::memory_repos()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, posts, favorites): Repos = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::memory_repos()
        };

        #[cfg(feature = "storage")]
        let (store, bucket): (Arc<dyn ObjectStore>, String) = match &config.storage {
            Some(storage) => (
                Arc::new(quill_infra::storage::SupabaseStorage::new(
                    quill_infra::storage::SupabaseStorageConfig {
                        base_url: storage.base_url.clone(),
                        service_key: storage.service_key.clone(),
                    },
                )),
                storage.bucket.clone(),
            ),
            None => {
                tracing::warn!("STORAGE_URL not set. Using in-memory object store.");
                (Arc::new(InMemoryObjectStore::new()), "images".to_string())
            }
        };

        #[cfg(not(feature = "storage"))]
        let (store, bucket): (Arc<dyn ObjectStore>, String) = {
            tracing::info!("Running without storage feature - using in-memory object store");
            (Arc::new(InMemoryObjectStore::new()), "images".to_string())
        };

        let media = Arc::new(MediaService::new(store, posts.clone(), bucket));
        let user_sync = Arc::new(UserSync::new(users.clone()));

        tracing::info!("Application state initialized");

        Self {
            users,
            posts,
            favorites,
            media,
            tokens,
            verifier,
            user_sync,
        }
    }

    fn memory_repos() -> Repos {
        let state = InMemoryState::new();
        (
            Arc::new(state.clone()),
            Arc::new(state.clone()),
            Arc::new(state),
        )
    }
}
