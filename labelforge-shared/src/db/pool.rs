/// Database connection pool management
///
/// This module provides the SQLite connection pool used by the API server and
/// the test suites. It includes a health check, pool statistics and a graceful
/// close.
///
/// # Example
///
/// ```no_run
/// use labelforge_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://labelforge.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///
///     let row: (i64,) = sqlx::query_as("SELECT ?")
///         .bind(42i64)
///         .fetch_one(&pool)
///         .await?;
///
///     Ok(())
/// }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// URL of a private in-memory database
///
/// Every connection to `sqlite::memory:` opens its own database, so pools built
/// on it must hold exactly one connection that is never recycled. See
/// [`DatabaseConfig::in_memory`].
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Configuration for the database connection pool
///
/// All timeouts are specified in seconds for ease of configuration from environment variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g., "sqlite://labelforge.db")
    pub url: String,

    /// Maximum number of connections in the pool
    ///
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of idle connections to maintain
    ///
    /// Default: 1
    pub min_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    ///
    /// Default: 30 seconds
    pub connect_timeout_seconds: u64,

    /// How long a connection can remain idle before being closed (seconds)
    ///
    /// Default: Some(600) (10 minutes)
    /// None = connections never closed due to idle time
    pub idle_timeout_seconds: Option<u64>,

    /// Maximum lifetime of a connection before forced recycling (seconds)
    ///
    /// Default: Some(1800) (30 minutes)
    pub max_lifetime_seconds: Option<u64>,

    /// Create the database file when it does not exist yet
    ///
    /// Default: true
    pub create_if_missing: bool,

    /// Turn on `PRAGMA foreign_keys`
    ///
    /// Default: false. Labels may reference items or users that do not exist.
    pub enforce_foreign_keys: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            max_lifetime_seconds: Some(1800),
            create_if_missing: true,
            enforce_foreign_keys: false,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a throwaway in-memory database
    ///
    /// Pins the pool to a single connection that is never closed, so the
    /// database lives exactly as long as the pool.
    pub fn in_memory() -> Self {
        Self {
            url: IN_MEMORY_URL.to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout_seconds: None,
            max_lifetime_seconds: None,
            ..Default::default()
        }
    }
}

/// Creates and initializes a SQLite connection pool
///
/// This function:
/// 1. Parses the connection URL and applies the file/pragma options
/// 2. Creates a pool with the specified configuration
/// 3. Performs a health check to verify the database answers queries
///
/// # Errors
///
/// Returns an error if:
/// - The database URL is invalid
/// - The database file cannot be opened or created
/// - Health check fails
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        connect_timeout_seconds = config.connect_timeout_seconds,
        "Creating database connection pool"
    );

    let connect_options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(config.create_if_missing)
        .foreign_keys(config.enforce_foreign_keys);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(config.idle_timeout_seconds.map(Duration::from_secs))
        .max_lifetime(config.max_lifetime_seconds.map(Duration::from_secs));

    if config.url == IN_MEMORY_URL && config.max_connections > 1 {
        warn!("In-memory database with more than one connection; each connection sees its own data");
        pool_options = pool_options.max_connections(1);
    }

    let pool = pool_options.connect_with(connect_options).await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Performs a health check on the database connection
///
/// # Errors
///
/// Returns an error if the health check query fails
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i64,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Current pool statistics
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub active_connections: usize,

    /// Number of idle connections available
    pub idle_connections: usize,

    /// Total connections in the pool
    pub total_connections: usize,
}

pub fn get_pool_stats(pool: &SqlitePool) -> PoolStats {
    let size = pool.size();
    let idle = pool.num_idle();

    PoolStats {
        active_connections: (size as usize).saturating_sub(idle),
        idle_connections: idle,
        total_connections: size as usize,
    }
}

/// Gracefully closes the connection pool
///
/// Call during shutdown so the SQLite file is released cleanly.
pub async fn close_pool(pool: SqlitePool) {
    info!("Closing database connection pool");
    pool.close().await;
    info!("Database connection pool closed");
}
