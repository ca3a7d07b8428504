//! Domain-level error types.

use thiserror::Error;

use crate::domain::FieldErrors;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    /// Ownership-scoped lookup miss. Deliberately does not distinguish
    /// "does not exist" from "belongs to someone else" so that handlers
    /// cannot leak the existence of other users' posts.
    #[error("Not found or forbidden")]
    NotFoundOrForbidden,

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid webhook signature: {0}")]
    SignatureInvalid(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

// Ownership misses are established by a dedicated re-query, never inferred
// from a storage error code, so every repository failure surfaces as an
// upstream failure.
impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Upstream(err.to_string())
    }
}
