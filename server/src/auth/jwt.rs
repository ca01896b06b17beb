//! Bearer-token verification.
//!
//! Tokens are Supabase-issued JWTs signed with a shared HS256 secret. When
//! no secret is configured the gate degrades to a permissive dev mode that
//! assigns every caller the same placeholder identity.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Identity assigned to every caller in [`AuthMode::DevPermissive`].
pub const DEV_CALLER_ID: &str = "temp-user-id";

/// How the gate treats credentials, fixed once at startup.
#[derive(Clone)]
pub enum AuthMode {
    /// A verification secret is configured; tokens are required and checked.
    Enforced(DecodingKey),
    /// No secret configured. Every caller becomes [`DEV_CALLER_ID`],
    /// token or not. Local development shortcut, never for production.
    DevPermissive,
}

impl AuthMode {
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(s) if !s.is_empty() => AuthMode::Enforced(DecodingKey::from_secret(s.as_bytes())),
            _ => AuthMode::DevPermissive,
        }
    }
}

/// Claims this service reads from a verified token. Expiry is checked by
/// the verifier against the raw payload, so only the subject is kept.
#[derive(Debug, Deserialize)]
pub struct Claims {
    /// Subject identifier, used as the caller identity.
    pub sub: String,
}

/// Verify a token and return its subject.
///
/// Expiry is validated; the audience is not pinned (Supabase sets one, and
/// this backend accepts any).
pub fn verify_token(key: &DecodingKey, token: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    let data = decode::<Claims>(token, key, &validation)?;
    Ok(data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
        aud: String,
    }

    // 2100-01-01, far enough out for any test run
    const FAR_FUTURE: i64 = 4102444800;

    fn make_token(secret: &str, sub: &str, exp: i64) -> String {
        let claims = TestClaims {
            sub: sub.to_string(),
            exp,
            aud: "authenticated".to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_yields_subject() {
        let key = DecodingKey::from_secret(b"secret");
        let token = make_token("secret", "user-123", FAR_FUTURE);

        assert_eq!(verify_token(&key, &token).unwrap(), "user-123");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let key = DecodingKey::from_secret(b"secret");
        let token = make_token("other-secret", "user-123", FAR_FUTURE);

        assert!(verify_token(&key, &token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let key = DecodingKey::from_secret(b"secret");
        let token = make_token("secret", "user-123", 1000);

        assert!(verify_token(&key, &token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let key = DecodingKey::from_secret(b"secret");

        assert!(verify_token(&key, "not-a-jwt").is_err());
    }

    #[test]
    fn test_mode_selection() {
        assert!(matches!(
            AuthMode::from_secret(None),
            AuthMode::DevPermissive
        ));
        assert!(matches!(
            AuthMode::from_secret(Some("")),
            AuthMode::DevPermissive
        ));
        assert!(matches!(
            AuthMode::from_secret(Some("secret")),
            AuthMode::Enforced(_)
        ));
    }
}
