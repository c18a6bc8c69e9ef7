/// Demo data seeding
///
/// Seeds the admin user, the demo project, and a batch of short review texts
/// to label. Everything here is safe to run against a database that already
/// holds data: the user and project use insert-or-ignore, and the text seed
/// simply appends another batch.

use crate::models::item::{CreateItem, Item};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;

/// Identifier of the demo project
pub const DEMO_PROJECT_ID: i64 = 1;

/// Email of the demo admin user
pub const DEMO_ADMIN_EMAIL: &str = "admin@example.com";

/// Greek restaurant reviews inserted by [`seed_demo_texts`]
pub const DEMO_TEXTS: [&str; 10] = [
    "Το φαγητό ήταν καταπληκτικό και το προσωπικό ευγενικό.",
    "Πολύ αργή εξυπηρέτηση, δεν θα ξαναπάω.",
    "Καλή ποιότητα αλλά ακριβό.",
    "Η ατμόσφαιρα ήταν υπέροχη και πολύ φιλική.",
    "Οι μερίδες ήταν μικρές για την τιμή.",
    "Το προσωπικό ήταν αδιάφορο και αγενές.",
    "Τα γλυκά ήταν εξαιρετικά, θα ξαναπάω σίγουρα.",
    "Η μουσική ήταν πολύ δυνατή, δεν μπορούσαμε να μιλήσουμε.",
    "Η τοποθεσία βολική και το πάρκινγκ εύκολο.",
    "Το φαγητό ήρθε κρύο στο τραπέζι.",
];

/// Name of the demo project
pub const DEMO_PROJECT_NAME: &str = "Demo – Text Classification";

/// Inserts the demo admin user and the demo project if they are missing
///
/// # Errors
///
/// Returns an error if either insert fails
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let users = sqlx::query(
        "INSERT OR IGNORE INTO users (email, password_hash, role) VALUES (?, ?, ?)",
    )
    .bind(DEMO_ADMIN_EMAIL)
    .bind("dev")
    .bind("admin")
    .execute(&mut *tx)
    .await?;

    let projects = sqlx::query("INSERT OR IGNORE INTO projects (id, name, type) VALUES (?, ?, ?)")
        .bind(DEMO_PROJECT_ID)
        .bind(DEMO_PROJECT_NAME)
        .bind("text")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        users_inserted = users.rows_affected(),
        projects_inserted = projects.rows_affected(),
        "Demo data seeded"
    );

    Ok(())
}

/// Appends [`DEMO_TEXTS`] as items of `project_id`
///
/// All rows are written in one transaction.
///
/// # Returns
///
/// Number of items inserted
pub async fn seed_demo_texts(pool: &SqlitePool, project_id: i64) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    for text in DEMO_TEXTS {
        Item::create(
            &mut *tx,
            CreateItem {
                project_id,
                payload: json!({ "text": text }),
            },
        )
        .await?;
    }

    tx.commit().await?;

    info!(project_id, inserted = DEMO_TEXTS.len(), "Demo texts seeded");
    Ok(DEMO_TEXTS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        migrations::run_migrations,
        pool::{create_pool, DatabaseConfig},
    };
    use crate::models::{project::Project, user::User};

    async fn migrated_pool() -> SqlitePool {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_seed_demo_data_is_idempotent() {
        let pool = migrated_pool().await;

        seed_demo_data(&pool).await.unwrap();
        seed_demo_data(&pool).await.unwrap();

        assert_eq!(User::count(&pool).await.unwrap(), 1);
        assert_eq!(Project::count(&pool).await.unwrap(), 1);

        let admin = User::find_by_email(&pool, DEMO_ADMIN_EMAIL)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, "admin");

        let project = Project::find_by_id(&pool, DEMO_PROJECT_ID)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(project.kind, "text");
        assert_eq!(project.name, DEMO_PROJECT_NAME);
    }

    #[tokio::test]
    async fn test_seed_demo_texts_appends_batch() {
        let pool = migrated_pool().await;
        seed_demo_data(&pool).await.unwrap();

        assert_eq!(seed_demo_texts(&pool, DEMO_PROJECT_ID).await.unwrap(), 10);
        assert_eq!(seed_demo_texts(&pool, DEMO_PROJECT_ID).await.unwrap(), 10);

        assert_eq!(
            Item::count_by_project(&pool, DEMO_PROJECT_ID).await.unwrap(),
            20
        );
    }
}
