//! Identity provider integrations: per-request token validation and
//! webhook signature verification.

mod jwt;
mod signature;

pub use jwt::{JwtConfig, JwtTokenService};
pub use signature::SharedSecretVerifier;
