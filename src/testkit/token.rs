//! Token builders for exercising the auth matrix.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::auth::TokenService;

/// Secret shared with [`super::test_config`].
pub const TEST_SECRET: &str = "test-secret";

/// A valid bearer token for `subject`.
#[must_use]
pub fn test_token(subject: &str) -> String {
    TokenService::new(TEST_SECRET, Algorithm::HS256, 60)
        .issue(subject)
        .expect("issue test token")
}

/// A token for `subject` that expired five minutes ago.
#[must_use]
pub fn expired_token(subject: &str) -> String {
    TokenService::new(TEST_SECRET, Algorithm::HS256, -5)
        .issue(subject)
        .expect("issue expired token")
}

/// A token signed with the wrong secret.
#[must_use]
pub fn forged_token(subject: &str) -> String {
    TokenService::new("not-the-secret", Algorithm::HS256, 60)
        .issue(subject)
        .expect("issue forged token")
}

#[derive(Serialize)]
struct BareClaims {
    exp: i64,
}

/// A correctly signed, unexpired token whose payload lacks a subject.
#[must_use]
pub fn subjectless_token() -> String {
    let claims = BareClaims {
        exp: Utc::now().timestamp() + 600,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("encode subjectless token")
}
