//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod object_store;
mod repository;

pub use auth::{AuthError, TokenClaims, TokenService, WebhookVerifier};
pub use object_store::{ObjectStore, ObjectStoreError};
pub use repository::{FavoriteRepository, PostRepository, UserRepository};
