use actix_web::{HttpResponse, ResponseError, web};
use std::sync::Arc;

use crate::auth::middleware::AuthenticatedMember;
use crate::models::commitments::Commitment;
use crate::push::server::UpdateHub;
use crate::service::commitments as commitment_service;
use crate::store::Store;

/// GET /api/commitments — the full commitments collection.
pub async fn get_commitments(store: web::Data<Store>) -> HttpResponse {
    match commitment_service::list_commitments(store.get_ref()).await {
        Ok(commitments) => HttpResponse::Ok().json(commitments),
        Err(e) => e.error_response(),
    }
}

/// POST /api/commitments — bulk replace: the submitted array becomes the
/// whole collection (deduped by (gigId, userId), last occurrence wins).
pub async fn replace_commitments(
    _member: AuthenticatedMember,
    store: web::Data<Store>,
    hub: web::Data<Arc<UpdateHub>>,
    body: web::Json<Vec<Commitment>>,
) -> HttpResponse {
    match commitment_service::replace_commitments(store.get_ref(), hub.get_ref(), body.into_inner())
        .await
    {
        Ok(stored) => HttpResponse::Ok().json(stored),
        Err(e) => e.error_response(),
    }
}

/// PUT /api/commitments — upsert one commitment by (gigId, userId).
pub async fn upsert_commitment(
    _member: AuthenticatedMember,
    store: web::Data<Store>,
    hub: web::Data<Arc<UpdateHub>>,
    body: web::Json<Commitment>,
) -> HttpResponse {
    match commitment_service::upsert_commitment(store.get_ref(), hub.get_ref(), body.into_inner())
        .await
    {
        Ok(stored) => HttpResponse::Ok().json(stored),
        Err(e) => e.error_response(),
    }
}
