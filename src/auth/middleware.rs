use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt;
use crate::models::members::Member;
use crate::store::Store;

/// Extractor for routes that require a logged-in member.
///
/// Validates the Bearer token, then resolves the member from storage so a
/// deleted account stops working immediately even with a live token.
pub struct AuthenticatedMember(pub Member);

impl FromRequest for AuthenticatedMember {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Missing Authorization header")
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
            })?;

            // 2. Validate the token against the configured secret.
            let secret = req.app_data::<web::Data<JwtSecret>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("JWT secret not configured")
            })?;

            let claims = jwt::validate_token(token, &secret.0)
                .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

            // 3. Resolve the member from storage.
            let store = req.app_data::<web::Data<Store>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("Storage not configured")
            })?;

            let member = store
                .list_members()
                .await
                .map_err(|e| {
                    actix_web::error::ErrorInternalServerError(format!("Storage error: {e}"))
                })?
                .into_iter()
                .find(|m| m.id == claims.sub)
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unknown member"))?;

            Ok(AuthenticatedMember(member))
        })
    }
}

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);
