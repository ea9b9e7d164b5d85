use actix_web::{HttpResponse, ResponseError, web};
use std::sync::Arc;

use crate::auth::authorization::require_admin;
use crate::auth::middleware::AuthenticatedMember;
use crate::models::members::{CreateMember, UpdateMember};
use crate::push::server::UpdateHub;
use crate::service::members as member_service;
use crate::store::Store;

/// GET /api/members — all members with credential secrets stripped.
pub async fn get_members(store: web::Data<Store>) -> HttpResponse {
    match member_service::list_members(store.get_ref()).await {
        Ok(members) => HttpResponse::Ok().json(members),
        Err(e) => e.error_response(),
    }
}

/// POST /api/members — create a member (admin only).
pub async fn create_member(
    member: AuthenticatedMember,
    store: web::Data<Store>,
    hub: web::Data<Arc<UpdateHub>>,
    body: web::Json<CreateMember>,
) -> HttpResponse {
    if let Err(forbidden) = require_admin(&member) {
        return forbidden;
    }

    match member_service::create_member(store.get_ref(), hub.get_ref(), body.into_inner()).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => e.error_response(),
    }
}

/// PUT /api/members/{id} — merge partial fields into a member (admin only).
pub async fn update_member(
    member: AuthenticatedMember,
    store: web::Data<Store>,
    hub: web::Data<Arc<UpdateHub>>,
    path: web::Path<String>,
    body: web::Json<UpdateMember>,
) -> HttpResponse {
    if let Err(forbidden) = require_admin(&member) {
        return forbidden;
    }

    let id = path.into_inner();
    match member_service::update_member(store.get_ref(), hub.get_ref(), &id, body.into_inner())
        .await
    {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => e.error_response(),
    }
}

/// DELETE /api/members/{id} — delete a member (admin only). Rejected with
/// 400 when it would remove the last admin.
pub async fn delete_member(
    member: AuthenticatedMember,
    store: web::Data<Store>,
    hub: web::Data<Arc<UpdateHub>>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(forbidden) = require_admin(&member) {
        return forbidden;
    }

    let id = path.into_inner();
    match member_service::delete_member(store.get_ref(), hub.get_ref(), &id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Member deleted successfully",
        })),
        Err(e) => e.error_response(),
    }
}
