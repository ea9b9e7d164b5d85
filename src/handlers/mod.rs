pub mod auth;
pub mod commitments;
pub mod gigs;
pub mod members;

use actix_web::web;

use crate::push::session;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Login (open) ──
    cfg.service(web::resource("/login").route(web::post().to(auth::login)));

    // ── Gig routes (reads open, mutations admin-only) ──
    cfg.service(
        web::scope("/gigs")
            .route("", web::get().to(gigs::get_gigs))
            .route("", web::post().to(gigs::create_gig))
            .route("/{id}", web::put().to(gigs::update_gig))
            .route("/{id}", web::delete().to(gigs::delete_gig)),
    );

    // ── Member routes (reads open, mutations admin-only) ──
    cfg.service(
        web::scope("/members")
            .route("", web::get().to(members::get_members))
            .route("", web::post().to(members::create_member))
            .route("/{id}", web::put().to(members::update_member))
            .route("/{id}", web::delete().to(members::delete_member)),
    );

    // ── Commitment routes (reads open, writes for any logged-in member) ──
    cfg.service(
        web::scope("/commitments")
            .route("", web::get().to(commitments::get_commitments))
            .route("", web::post().to(commitments::replace_commitments))
            .route("", web::put().to(commitments::upsert_commitment)),
    );

    // ── Live-update push channel ──
    cfg.service(web::resource("/updates").route(web::get().to(session::ws_connect)));
}
