use actix_web::HttpResponse;

use crate::auth::middleware::AuthenticatedMember;
use crate::models::members::Role;

/// Gate for admin-only mutations (gig and member management).
pub fn require_admin(member: &AuthenticatedMember) -> Result<(), HttpResponse> {
    if member.0.role == Role::Admin {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Administrator access required",
        })))
    }
}
