use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::members::{Member, Role};

/// Claims carried by locally issued session tokens.
///
/// This service is its own identity provider: tokens are signed HS256 with
/// the `JWT_SECRET` the server holds, and `sub` is the member's id in the
/// members collection.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The member id.
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: usize,
}

/// Session lifetime: one day.
pub const TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

/// Mint a session token for an authenticated member.
pub fn issue_token(member: &Member, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: member.id.clone(),
        email: member.email.clone(),
        role: member.role,
        exp: (now + TOKEN_TTL_SECS) as usize,
        iat: now as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate a session token and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("{e:?}"))
}
