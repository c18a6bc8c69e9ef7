/// Common test utilities for integration tests
///
/// Every `TestContext` owns a fresh in-memory database with the schema
/// applied, the demo user and project seeded, and a router built on top.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use labelforge_api::app::{build_router, AppState};
use labelforge_api::config::{ApiConfig, Config, DatabaseConfig};
use labelforge_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig as PoolConfig},
    seed::seed_demo_data,
};
use sqlx::SqlitePool;
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

/// A buffered response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Response is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .unwrap_or_else(|| panic!("Missing header {}", name))
            .to_str()
            .unwrap()
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            seed_demo_data: true,
        },
    }
}

impl TestContext {
    /// Creates a new test context with a fresh seeded database
    pub async fn new() -> anyhow::Result<Self> {
        let db = create_pool(PoolConfig::in_memory()).await?;
        run_migrations(&db).await?;
        seed_demo_data(&db).await?;

        let app = build_router(AppState::new(db.clone(), test_config()));

        Ok(TestContext { db, app })
    }

    /// Sends a request and buffers the response
    pub async fn request(&self, method: &str, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri).await
    }

    /// Seeds the demo texts through the API
    pub async fn seed_texts(&self) {
        let response = self.get("/debug/seed_texts").await;
        assert_eq!(response.status, StatusCode::OK);
    }
}
