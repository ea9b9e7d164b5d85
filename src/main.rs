use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use gigcal_backend::auth::middleware::JwtSecret;
use gigcal_backend::handlers;
use gigcal_backend::models::members::{Member, Role};
use gigcal_backend::push::server::UpdateHub;
use gigcal_backend::store::{FileStore, MemoryStore, StorageError, Store};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let storage = std::env::var("STORAGE").unwrap_or_else(|_| "file".to_string());
    let store = match storage.as_str() {
        "memory" => {
            tracing::info!("Using in-memory storage (state is lost on restart)");
            Store::Memory(MemoryStore::new())
        }
        _ => {
            let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());
            let file_store = FileStore::open(&data_dir)
                .await
                .map_err(std::io::Error::other)?;
            tracing::info!("Using file storage in {data_dir}");
            Store::File(file_store)
        }
    };

    seed_admin(&store).await.map_err(std::io::Error::other)?;

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let secret_data = web::Data::new(JwtSecret(jwt_secret));
    let store_data = web::Data::new(store);

    // The shared fanout for full-collection snapshot broadcasts.
    let hub = web::Data::new(Arc::new(UpdateHub::new()));

    let static_dir = std::env::var("STATIC_DIR").ok();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        let mut app = App::new()
            .wrap(cors)
            .app_data(store_data.clone())
            .app_data(hub.clone())
            .app_data(secret_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes));

        // Serve a built frontend when one is configured.
        if let Some(dir) = &static_dir {
            app = app.service(Files::new("/", dir).index_file("index.html"));
        }

        app
    })
    .bind(&bind_addr)?
    .run()
    .await
}

/// Bootstrap a fresh deployment: when the members collection is empty,
/// seed one admin from `ADMIN_EMAIL`/`ADMIN_PASSWORD` so someone can log in.
async fn seed_admin(store: &Store) -> Result<(), StorageError> {
    if !store.list_members().await?.is_empty() {
        return Ok(());
    }

    let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        tracing::warn!(
            "members collection is empty and ADMIN_EMAIL/ADMIN_PASSWORD are not set; \
             no one will be able to log in"
        );
        return Ok(());
    };

    store
        .insert_member(Member {
            id: Uuid::new_v4().to_string(),
            name: "Administrator".to_string(),
            email,
            phone: String::new(),
            password,
            role: Role::Admin,
        })
        .await?;
    tracing::info!("Seeded initial admin account");
    Ok(())
}
