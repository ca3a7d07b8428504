//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains database, object storage, and identity provider
//! integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT validation and webhook signature verification
//! - `storage` - Supabase-style object storage over HTTP

pub mod database;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::InMemoryState;
pub use storage::InMemoryObjectStore;

#[cfg(feature = "auth")]
pub use auth::{JwtTokenService, SharedSecretVerifier};

#[cfg(feature = "postgres")]
pub use database::{
    PostgresFavoriteRepository, PostgresPostRepository, PostgresUserRepository,
};

#[cfg(feature = "storage")]
pub use storage::{SupabaseStorage, SupabaseStorageConfig};
