//! Webhook signature verification against a shared secret.
//!
//! The identity provider signs each event with HMAC-SHA256 over
//! `"{event_id}.{timestamp}.{body}"`. The secret arrives as
//! `whsec_<base64>`; the signature header carries one or more
//! space-separated `v1,<base64>` candidates and any match accepts.
//! Verification happens before the payload is parsed for trust purposes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use quill_core::ports::{AuthError, WebhookVerifier};

type HmacSha256 = Hmac<Sha256>;

/// Accepted clock skew between the event timestamp and now, in seconds.
const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Shared-secret webhook verifier.
pub struct SharedSecretVerifier {
    key: Vec<u8>,
    tolerance_secs: i64,
}

impl SharedSecretVerifier {
    /// Build a verifier from a `whsec_`-prefixed base64 secret (the bare
    /// base64 form is accepted too).
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        let encoded = secret.strip_prefix("whsec_").unwrap_or(secret);
        let key = BASE64
            .decode(encoded)
            .map_err(|e| AuthError::InvalidSignature(format!("bad webhook secret: {e}")))?;

        Ok(Self {
            key,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        })
    }

    fn mac(&self, event_id: &str, timestamp: &str, body: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC can take key of any size");
        mac.update(event_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(body);
        mac
    }

    /// Produce the `v1,<base64>` signature for an envelope. Used by tests
    /// and local tooling to fabricate signed events.
    pub fn sign(&self, event_id: &str, timestamp: &str, body: &[u8]) -> String {
        let digest = self.mac(event_id, timestamp, body).finalize().into_bytes();
        format!("v1,{}", BASE64.encode(digest))
    }
}

impl WebhookVerifier for SharedSecretVerifier {
    fn verify(
        &self,
        event_id: &str,
        timestamp: &str,
        signature: &str,
        body: &[u8],
    ) -> Result<(), AuthError> {
        let ts: i64 = timestamp
            .parse()
            .map_err(|_| AuthError::InvalidSignature("malformed timestamp".to_string()))?;

        if (Utc::now().timestamp() - ts).abs() > self.tolerance_secs {
            return Err(AuthError::InvalidSignature(
                "timestamp outside tolerance".to_string(),
            ));
        }

        for candidate in signature.split_whitespace() {
            let Some(encoded) = candidate.strip_prefix("v1,") else {
                // Unknown signature versions are skipped, not errors.
                continue;
            };
            let Ok(bytes) = BASE64.decode(encoded) else {
                continue;
            };
            // verify_slice is constant-time.
            if self.mac(event_id, timestamp, body).verify_slice(&bytes).is_ok() {
                return Ok(());
            }
        }

        Err(AuthError::InvalidSignature(
            "no matching signature".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_dGVzdC1zZWNyZXQtZm9yLXF1aWxs"; // "test-secret-for-quill"

    fn now() -> String {
        Utc::now().timestamp().to_string()
    }

    #[test]
    fn accepts_a_valid_signature() {
        let verifier = SharedSecretVerifier::new(SECRET).unwrap();
        let body = br#"{"type":"user.created","data":{"id":"u1"}}"#;
        let ts = now();
        let sig = verifier.sign("msg_1", &ts, body);

        assert!(verifier.verify("msg_1", &ts, &sig, body).is_ok());
    }

    #[test]
    fn rejects_a_tampered_body() {
        let verifier = SharedSecretVerifier::new(SECRET).unwrap();
        let ts = now();
        let sig = verifier.sign("msg_1", &ts, b"original");

        let result = verifier.verify("msg_1", &ts, &sig, b"tampered");
        assert!(matches!(result, Err(AuthError::InvalidSignature(_))));
    }

    #[test]
    fn rejects_a_signature_from_another_secret() {
        let verifier = SharedSecretVerifier::new(SECRET).unwrap();
        let other =
            SharedSecretVerifier::new("whsec_b3RoZXItc2VjcmV0LWVudGlyZWx5").unwrap();
        let ts = now();
        let sig = other.sign("msg_1", &ts, b"body");

        assert!(verifier.verify("msg_1", &ts, &sig, b"body").is_err());
    }

    #[test]
    fn accepts_any_matching_candidate() {
        let verifier = SharedSecretVerifier::new(SECRET).unwrap();
        let ts = now();
        let good = verifier.sign("msg_1", &ts, b"body");
        let header = format!("v1,AAAA {good}");

        assert!(verifier.verify("msg_1", &ts, &header, b"body").is_ok());
    }

    #[test]
    fn rejects_a_stale_timestamp() {
        let verifier = SharedSecretVerifier::new(SECRET).unwrap();
        let stale = (Utc::now().timestamp() - 3600).to_string();
        let sig = verifier.sign("msg_1", &stale, b"body");

        let result = verifier.verify("msg_1", &stale, &sig, b"body");
        assert!(matches!(result, Err(AuthError::InvalidSignature(_))));
    }

    #[test]
    fn rejects_a_malformed_timestamp() {
        let verifier = SharedSecretVerifier::new(SECRET).unwrap();
        assert!(verifier.verify("msg_1", "not-a-number", "v1,AAAA", b"body").is_err());
    }
}
