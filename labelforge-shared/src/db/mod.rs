/// Database layer for LabelForge
///
/// # Modules
///
/// - `pool`: SQLite connection pool management with health checks
/// - `migrations`: Embedded schema bootstrap
/// - `seed`: Demo user, project and texts
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use labelforge_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig::in_memory()).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
pub mod seed;
