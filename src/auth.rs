//! Token Service: issues and validates signed, expiring identity tokens.
//!
//! Pure functions over configuration and the wall clock; nothing here is
//! persisted. Validation distinguishes bad signature/format, expiry, and a
//! missing subject so failures can be logged precisely, even though all
//! three are unauthenticated at the HTTP boundary.

use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AuthError, ConfigError, Error, Result};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Option<String>,
    exp: i64,
}

/// Issues and validates identity tokens with a symmetric signing key.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    expires_minutes: i64,
}

impl TokenService {
    /// Create a token service with an explicit secret, algorithm, and TTL.
    #[must_use]
    pub fn new(secret: &str, algorithm: Algorithm, expires_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            expires_minutes,
        }
    }

    /// Build a token service from configuration.
    pub fn from_config(config: &AuthConfig) -> std::result::Result<Self, ConfigError> {
        let algorithm =
            Algorithm::from_str(&config.algorithm).map_err(|e| ConfigError::InvalidValue {
                field: "auth.algorithm",
                reason: e.to_string(),
            })?;
        Ok(Self::new(&config.secret, algorithm, config.expires_minutes))
    }

    /// Issue a token for `subject`, expiring after the configured TTL.
    ///
    /// Repeated calls for the same subject yield different tokens since
    /// the expiry instant differs.
    pub fn issue(&self, subject: &str) -> Result<String> {
        let exp = (Utc::now() + Duration::minutes(self.expires_minutes)).timestamp();
        let claims = Claims {
            sub: Some(subject.to_owned()),
            exp,
        };
        encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .map_err(|e| Error::TokenSigning(e.to_string()))
    }

    /// Decode and verify a token, returning its subject.
    ///
    /// Signature and expiry are checked with zero leeway.
    pub fn validate(&self, token: &str) -> std::result::Result<String, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid(e.to_string()),
            })?;

        match data.claims.sub {
            Some(subject) if !subject.is_empty() => Ok(subject),
            _ => Err(AuthError::MissingSubject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", Algorithm::HS256, 60)
    }

    #[test]
    fn issue_then_validate_roundtrip() {
        let tokens = service();
        let token = tokens.issue("u123").expect("issue");
        assert_eq!(tokens.validate(&token).expect("validate"), "u123");
    }

    #[test]
    fn issued_expiry_within_configured_ttl() {
        let tokens = service();
        let token = tokens.issue("u123").expect("issue");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .expect("decode");

        let expected = Utc::now().timestamp() + 60 * 60;
        assert!((data.claims.exp - expected).abs() <= 5);
    }

    #[test]
    fn repeated_issues_differ() {
        let tokens = service();
        let a = tokens.issue("u123").expect("issue");
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let b = tokens.issue("u123").expect("issue");
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_expired_token() {
        let expired = TokenService::new("test-secret", Algorithm::HS256, -5);
        let token = expired.issue("u123").expect("issue");
        assert!(matches!(service().validate(&token), Err(AuthError::Expired)));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let forger = TokenService::new("other-secret", Algorithm::HS256, 60);
        let token = forger.issue("u123").expect("issue");
        assert!(matches!(
            service().validate(&token),
            Err(AuthError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(matches!(
            service().validate("not.a.token"),
            Err(AuthError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_token_without_subject() {
        let claims = Claims {
            sub: None,
            exp: Utc::now().timestamp() + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");
        assert!(matches!(
            service().validate(&token),
            Err(AuthError::MissingSubject)
        ));
    }

    #[test]
    fn rejects_token_with_empty_subject() {
        let claims = Claims {
            sub: Some(String::new()),
            exp: Utc::now().timestamp() + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");
        assert!(matches!(
            service().validate(&token),
            Err(AuthError::MissingSubject)
        ));
    }
}
