//! Integration test for session token handling.
//!
//! Mints tokens locally with the same HS256 secret the server would use and
//! validates them through the `jwt` module. No running server or data
//! directory is needed.
//!
//! Run with: `cargo test --test auth_test`

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use gigcal_backend::auth::jwt::{Claims, issue_token, validate_token};
use gigcal_backend::models::members::{Member, Role};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn test_member(role: Role) -> Member {
    Member {
        id: Uuid::new_v4().to_string(),
        name: "Alice Smith".to_string(),
        email: "alice@example.com".to_string(),
        phone: String::new(),
        password: "hunter2".to_string(),
        role,
    }
}

#[test]
fn test_issued_token_round_trips() {
    let member = test_member(Role::Admin);
    let token = issue_token(&member, TEST_SECRET).expect("Failed to mint token");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, member.id);
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.role, Role::Admin);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        email: "expired@example.com".to_string(),
        role: Role::Member,
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: now - 3600,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = issue_token(&test_member(Role::Member), TEST_SECRET).unwrap();

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}
