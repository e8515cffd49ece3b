//! Session Token Signing
//!
//! A session token is `<session_id>.<signature>` where the signature is
//! HMAC-SHA256 over the session id string, base64url-encoded. The token
//! itself carries no claims; all session state lives in the database.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use platform::crypto::{constant_time_eq, hmac_sha256};
use uuid::Uuid;

/// Generate a signed session token
pub fn generate(secret: &[u8; 32], session_id: Uuid) -> String {
    let session_id = session_id.to_string();
    let signature = hmac_sha256(secret, session_id.as_bytes());

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a session token and extract the session id
///
/// Returns `None` for malformed tokens, bad signatures, or invalid UUIDs.
pub fn verify(secret: &[u8; 32], token: &str) -> Option<Uuid> {
    let (session_id, signature_b64) = token.split_once('.')?;

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    let expected = hmac_sha256(secret, session_id.as_bytes());

    if !constant_time_eq(&signature, &expected) {
        return None;
    }

    session_id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let secret = [7u8; 32];
        let session_id = Uuid::new_v4();

        let token = generate(&secret, session_id);
        assert_eq!(verify(&secret, &token), Some(session_id));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let session_id = Uuid::new_v4();
        let token = generate(&[7u8; 32], session_id);
        assert_eq!(verify(&[8u8; 32], &token), None);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let secret = [7u8; 32];
        let token = generate(&secret, Uuid::new_v4());

        let mut tampered = token.clone();
        tampered.replace_range(0..1, if token.starts_with('0') { "1" } else { "0" });
        assert_eq!(verify(&secret, &tampered), None);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let secret = [7u8; 32];
        assert_eq!(verify(&secret, ""), None);
        assert_eq!(verify(&secret, "no-dot-here"), None);
        assert_eq!(verify(&secret, "a.b.c"), None);
        assert_eq!(verify(&secret, "not-a-uuid.c2ln"), None);
    }
}
