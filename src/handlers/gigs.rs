use actix_web::{HttpResponse, ResponseError, web};
use std::sync::Arc;

use crate::auth::authorization::require_admin;
use crate::auth::middleware::AuthenticatedMember;
use crate::models::gigs::{CreateGig, UpdateGig};
use crate::push::server::UpdateHub;
use crate::service::gigs as gig_service;
use crate::store::Store;

/// GET /api/gigs — the full gigs collection, wrapped under a `gigs` key.
pub async fn get_gigs(store: web::Data<Store>) -> HttpResponse {
    match gig_service::list_gigs(store.get_ref()).await {
        Ok(gigs) => HttpResponse::Ok().json(serde_json::json!({ "gigs": gigs })),
        Err(e) => e.error_response(),
    }
}

/// POST /api/gigs — create a gig (admin only).
pub async fn create_gig(
    member: AuthenticatedMember,
    store: web::Data<Store>,
    hub: web::Data<Arc<UpdateHub>>,
    body: web::Json<CreateGig>,
) -> HttpResponse {
    if let Err(forbidden) = require_admin(&member) {
        return forbidden;
    }

    match gig_service::create_gig(store.get_ref(), hub.get_ref(), body.into_inner()).await {
        Ok(gig) => HttpResponse::Created().json(gig),
        Err(e) => e.error_response(),
    }
}

/// PUT /api/gigs/{id} — merge partial fields into a gig (admin only).
pub async fn update_gig(
    member: AuthenticatedMember,
    store: web::Data<Store>,
    hub: web::Data<Arc<UpdateHub>>,
    path: web::Path<String>,
    body: web::Json<UpdateGig>,
) -> HttpResponse {
    if let Err(forbidden) = require_admin(&member) {
        return forbidden;
    }

    let id = path.into_inner();
    match gig_service::update_gig(store.get_ref(), hub.get_ref(), &id, body.into_inner()).await {
        Ok(gig) => HttpResponse::Ok().json(gig),
        Err(e) => e.error_response(),
    }
}

/// DELETE /api/gigs/{id} — delete a gig and its commitments (admin only).
pub async fn delete_gig(
    member: AuthenticatedMember,
    store: web::Data<Store>,
    hub: web::Data<Arc<UpdateHub>>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(forbidden) = require_admin(&member) {
        return forbidden;
    }

    let id = path.into_inner();
    match gig_service::delete_gig(store.get_ref(), hub.get_ref(), &id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}
