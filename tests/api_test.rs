//! HTTP surface tests: routing, status codes, auth gating, and wire shapes,
//! driven through the actix test harness over the in-memory store.

use actix_web::{App, test, web};
use std::sync::Arc;

use gigcal_backend::auth::jwt::issue_token;
use gigcal_backend::auth::middleware::JwtSecret;
use gigcal_backend::handlers;
use gigcal_backend::models::members::{Member, Role};
use gigcal_backend::push::server::UpdateHub;
use gigcal_backend::store::{MemoryStore, Store};

const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn admin_member() -> Member {
    Member {
        id: "admin-1".to_string(),
        name: "Alice".to_string(),
        email: "alice@band.test".to_string(),
        phone: String::new(),
        password: "topsecret".to_string(),
        role: Role::Admin,
    }
}

fn regular_member() -> Member {
    Member {
        id: "member-1".to_string(),
        name: "Bob".to_string(),
        email: "bob@band.test".to_string(),
        phone: String::new(),
        password: "paradiddle".to_string(),
        role: Role::Member,
    }
}

async fn seeded_data() -> (
    web::Data<Store>,
    web::Data<Arc<UpdateHub>>,
    web::Data<JwtSecret>,
) {
    let store = Store::Memory(MemoryStore::new());
    store.insert_member(admin_member()).await.unwrap();
    store.insert_member(regular_member()).await.unwrap();
    (
        web::Data::new(store),
        web::Data::new(Arc::new(UpdateHub::new())),
        web::Data::new(JwtSecret(TEST_SECRET.to_string())),
    )
}

fn bearer(member: &Member) -> (&'static str, String) {
    let token = issue_token(member, TEST_SECRET).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! test_app {
    ($store:expr, $hub:expr, $secret:expr) => {
        test::init_service(
            App::new()
                .app_data($store.clone())
                .app_data($hub.clone())
                .app_data($secret.clone())
                .service(web::scope("/api").configure(handlers::init_routes)),
        )
        .await
    };
}

#[actix_web::test]
async fn login_rejects_bad_credentials() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(serde_json::json!({"email": "alice@band.test", "password": "wrong"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn login_returns_sanitized_user_and_token() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(serde_json::json!({"email": "alice@band.test", "password": "topsecret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "alice@band.test");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password").is_none());
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn created_gig_appears_in_listing_with_defaults() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);

    let req = test::TestRequest::post()
        .uri("/api/gigs")
        .insert_header(bearer(&admin_member()))
        .set_json(serde_json::json!({
            "title": "Rock Night",
            "date": "2024-04-15T20:00",
            "venue": "The Blue Room",
            "status": "proposed",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::get().uri("/api/gigs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let gigs = body["gigs"].as_array().unwrap();
    let rock_night = gigs
        .iter()
        .find(|g| g["title"] == "Rock Night")
        .expect("created gig missing from listing");
    assert_eq!(rock_night["status"], "proposed");
    assert_eq!(rock_night["assignedMembers"], serde_json::json!([]));
    assert!(!rock_night["id"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn gig_mutations_are_admin_only() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);

    let body = serde_json::json!({
        "title": "Rock Night",
        "date": "2024-04-15T20:00",
        "venue": "The Blue Room",
    });

    let req = test::TestRequest::post()
        .uri("/api/gigs")
        .set_json(body.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/gigs")
        .insert_header(bearer(&regular_member()))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn create_gig_without_required_fields_is_a_validation_error() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);

    let req = test::TestRequest::post()
        .uri("/api/gigs")
        .insert_header(bearer(&admin_member()))
        .set_json(serde_json::json!({"title": "No venue, no date"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[actix_web::test]
async fn updating_unknown_gig_is_404() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);

    let req = test::TestRequest::put()
        .uri("/api/gigs/nope")
        .insert_header(bearer(&admin_member()))
        .set_json(serde_json::json!({"title": "Renamed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn member_listing_strips_secrets() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);

    let req = test::TestRequest::get().uri("/api/members").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let members = body.as_array().unwrap();
    assert_eq!(members.len(), 2);
    for member in members {
        assert!(member.get("password").is_none());
    }
}

#[actix_web::test]
async fn member_delete_status_codes() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);
    let auth = bearer(&admin_member());

    // Unknown id.
    let req = test::TestRequest::delete()
        .uri("/api/members/ghost")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // Removing the regular member is fine.
    let req = test::TestRequest::delete()
        .uri("/api/members/member-1")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Removing the last admin is rejected with the collection untouched.
    let req = test::TestRequest::delete()
        .uri("/api/members/admin-1")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Cannot delete the last admin");

    let req = test::TestRequest::get().uri("/api/members").to_request();
    let resp = test::call_service(&app, req).await;
    let members: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(members.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn commitment_bulk_replace_keeps_last_duplicate() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);

    let req = test::TestRequest::post()
        .uri("/api/commitments")
        .insert_header(bearer(&regular_member()))
        .set_json(serde_json::json!([
            {"gigId": "g1", "userId": "u1", "status": "confirmed"},
            {"gigId": "g1", "userId": "u1", "status": "declined"},
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get().uri("/api/commitments").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let commitments = body.as_array().unwrap();
    assert_eq!(commitments.len(), 1);
    assert_eq!(commitments[0]["status"], "declined");
}

#[actix_web::test]
async fn deleting_a_gig_cascades_its_commitments() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);
    let auth = bearer(&admin_member());

    let req = test::TestRequest::post()
        .uri("/api/gigs")
        .insert_header(auth.clone())
        .set_json(serde_json::json!({
            "id": "g1",
            "title": "Rock Night",
            "date": "2024-04-15T20:00",
            "venue": "The Blue Room",
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/commitments")
        .insert_header(auth.clone())
        .set_json(serde_json::json!([
            {"gigId": "g1", "userId": "u1", "status": "confirmed"},
            {"gigId": "g2", "userId": "u1", "status": "confirmed"},
        ]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::delete()
        .uri("/api/gigs/g1")
        .insert_header(auth)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get().uri("/api/commitments").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let commitments = body.as_array().unwrap();
    assert_eq!(commitments.len(), 1);
    assert_eq!(commitments[0]["gigId"], "g2");
}

#[actix_web::test]
async fn commitment_upsert_route_replaces_by_key() {
    let (store, hub, secret) = seeded_data().await;
    let app = test_app!(store, hub, secret);
    let auth = bearer(&regular_member());

    for status in ["confirmed", "declined"] {
        let req = test::TestRequest::put()
            .uri("/api/commitments")
            .insert_header(auth.clone())
            .set_json(serde_json::json!({
                "gigId": "g1", "userId": "member-1", "status": status,
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
    }

    let req = test::TestRequest::get().uri("/api/commitments").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let commitments = body.as_array().unwrap();
    assert_eq!(commitments.len(), 1);
    assert_eq!(commitments[0]["status"], "declined");
}
