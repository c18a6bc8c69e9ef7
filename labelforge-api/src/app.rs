/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use labelforge_api::{app::{build_router, AppState}, config::Config};
/// use labelforge_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let app = build_router(AppState::new(pool, config));
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET       /health
/// ├── GET       /items/next          ?user_id&project_id
/// ├── GET, POST /labels/add          ?item_id&label&user_id
/// ├── GET       /export/csv          ?project_id
/// ├── GET       /export/jsonl        ?project_id
/// ├── GET       /debug/status
/// ├── GET       /debug/seed_texts    ?project_id
/// └── GET       /ui
/// ```
///
/// # Middleware Stack
///
/// Applied in order (innermost first):
/// 1. Logging (tower-http TraceLayer)
/// 2. Compression (tower-http CompressionLayer)
/// 3. CORS (tower-http CorsLayer)
/// 4. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let labeling_routes = Router::new()
        .route("/items/next", get(routes::items::next_item))
        .route(
            "/labels/add",
            get(routes::labels::add_label).post(routes::labels::add_label),
        );

    let export_routes = Router::new()
        .route("/csv", get(routes::export::export_csv))
        .route("/jsonl", get(routes::export::export_jsonl));

    let debug_routes = Router::new()
        .route("/status", get(routes::debug::status))
        .route("/seed_texts", get(routes::debug::seed_texts));

    let cors = cors_layer(&state.config);
    let production = state.config.api.production;

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/ui", get(routes::ui::ui))
        .merge(labeling_routes)
        .nest("/export", export_routes)
        .nest("/debug", debug_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
