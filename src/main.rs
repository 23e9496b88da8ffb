use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use moonlight_jobs::config::{LoggingSettings, Settings};
use moonlight_jobs::core::JobFilterEngine;
use moonlight_jobs::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use moonlight_jobs::services::{CacheManager, ListingsClient, PostgresClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.compact().init(),
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&LoggingSettings::default());
            return Err(startup_error("Failed to load configuration", e));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting Moonlight Jobs search service...");

    let listings = Arc::new(
        ListingsClient::new(
            settings.backend.url.clone(),
            settings.backend.api_key.clone(),
            settings.backend.jobs_table.clone(),
            Duration::from_secs(settings.backend.timeout_secs.unwrap_or(30)),
        )
        .map_err(|e| startup_error("Failed to build listings client", e))?,
    );

    info!("Listings client initialized (table: {})", settings.backend.jobs_table);

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = Arc::new(
        CacheManager::new(&settings.cache.redis_url, l1_cache_size, cache_ttl)
            .await
            .map_err(|e| startup_error("Failed to connect to Redis", e))?,
    );

    info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);

    let postgres = Arc::new(
        PostgresClient::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
            settings.database.acquire_timeout_secs,
            settings.database.idle_timeout_secs,
        )
        .await
        .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?,
    );

    info!("PostgreSQL client initialized");

    let app_state = AppState {
        listings,
        cache,
        postgres,
        engine: JobFilterEngine::new(),
        search: settings.search.clone(),
        filters_ttl_secs: settings.cache.filters_ttl_secs.unwrap_or(30 * 24 * 60 * 60),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
