//! Authentication ports - per-request identity and webhook trust.
//!
//! Identity is externally owned: requests carry a token minted by the
//! identity provider, and user lifecycle changes arrive as signed webhook
//! events. Neither credential is created locally.

/// Claims extracted from a verified request token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// The identity provider's user id (the `sub` claim).
    pub user_id: String,
    pub exp: i64,
}

/// Token service trait for validating per-request identity tokens.
pub trait TokenService: Send + Sync {
    /// Validate and decode a token into its claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Verifier for signed webhook envelopes.
///
/// Must be consulted before the payload is parsed for trust purposes; a
/// verification failure means no mutation may happen.
pub trait WebhookVerifier: Send + Sync {
    /// Verify the signature headers against the raw body.
    fn verify(
        &self,
        event_id: &str,
        timestamp: &str,
        signature: &str,
        body: &[u8],
    ) -> Result<(), AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid webhook signature: {0}")]
    InvalidSignature(String),
}
