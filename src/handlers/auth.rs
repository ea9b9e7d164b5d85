use actix_web::{HttpResponse, ResponseError, web};

use crate::auth::middleware::JwtSecret;
use crate::models::members::LoginRequest;
use crate::service::auth as auth_service;
use crate::store::Store;

/// POST /api/login — authenticate and mint a session token.
pub async fn login(
    store: web::Data<Store>,
    secret: web::Data<JwtSecret>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    match auth_service::login(store.get_ref(), &secret.0, body.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}
