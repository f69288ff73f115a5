use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use std::sync::Arc;
use threadwork_backend::auth::tokens::TokenCache;
use threadwork_backend::cache::{CacheConfig, RedisCache};
use threadwork_backend::confirmation_log::ConfirmationLog;
use threadwork_backend::create_pool;
use threadwork_backend::handlers;
use threadwork_backend::storage::UploadStore;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    let db_data = web::Data::new(db);

    // Initialize Redis cache
    let redis_url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
    let redis_cache = RedisCache::new(&redis_url)
        .await
        .expect("Failed to connect to Redis");
    let redis_data = web::Data::new(Arc::new(redis_cache));
    tracing::info!("Connected to Redis");

    let cache_config = web::Data::new(CacheConfig::from_env());

    // In-process bearer-token resolver cache.
    let token_cache = web::Data::new(Arc::new(TokenCache::new()));

    // Design artifacts live on disk; uploads are written by the upload
    // service, we only resolve and serve them.
    let uploads_dir = std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "./uploads".to_string());
    let upload_store = UploadStore::new(&uploads_dir);
    upload_store
        .ensure_root()
        .expect("Failed to create uploads directory");
    let upload_store = web::Data::new(upload_store);

    // Flat-file projection of confirmed orders for downstream reporting.
    let log_path = std::env::var("CONFIRMATION_LOG")
        .unwrap_or_else(|_| "./confirmed_orders.txt".to_string());
    let confirmation_log = web::Data::new(Arc::new(ConfirmationLog::new(&log_path)));
    tracing::info!(path = %log_path, "confirmation log ready");

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(redis_data.clone())
            .app_data(cache_config.clone())
            .app_data(token_cache.clone())
            .app_data(upload_store.clone())
            .app_data(confirmation_log.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
            .service(Files::new("/uploads", uploads_dir.clone()))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
