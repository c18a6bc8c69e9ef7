/// Item model and the next-item selector
///
/// An item is one unit of content to label. Its payload is opaque JSON stored
/// as text; text projects wrap the content as `{"text": "..."}`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE items (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     project_id INTEGER NOT NULL REFERENCES projects(id),
///     payload_json TEXT NOT NULL,
///     created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use labelforge_shared::models::item::Item;
/// # use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// match Item::next_unlabeled(&pool, 1, 1).await? {
///     Some(item) => println!("label item #{}: {}", item.id, item.payload()?),
///     None => println!("all done"),
/// }
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{Sqlite, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,

    pub project_id: i64,

    /// Raw payload JSON as stored
    pub payload_json: String,

    pub created_at: NaiveDateTime,
}

/// Input for creating a new item
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub project_id: i64,
    pub payload: serde_json::Value,
}

impl Item {
    /// Parses the stored payload
    pub fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.payload_json)
    }

    /// Creates a new item
    ///
    /// Accepts any executor so batches can be inserted inside a transaction.
    pub async fn create<'e, E>(executor: E, data: CreateItem) -> Result<Self, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (project_id, payload_json)
            VALUES (?, ?)
            RETURNING id, project_id, payload_json, created_at
            "#,
        )
        .bind(data.project_id)
        .bind(Json(data.payload))
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, project_id, payload_json, created_at FROM items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Selects the next item `user_id` has not labeled in `project_id`
    ///
    /// Items are handed out in ascending id order. Selection is not exclusive:
    /// two users asking at the same time get the same item, and each labels it
    /// independently.
    ///
    /// # Returns
    ///
    /// `None` once the user has labeled every item in the project (or the
    /// project has no items).
    pub async fn next_unlabeled(
        pool: &SqlitePool,
        project_id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT i.id, i.project_id, i.payload_json, i.created_at
            FROM items i
            WHERE i.project_id = ?
              AND NOT EXISTS (
                  SELECT 1 FROM labels l
                  WHERE l.item_id = i.id AND l.user_id = ?
              )
            ORDER BY i.id
            LIMIT 1
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    pub async fn count_by_project(pool: &SqlitePool, project_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items WHERE project_id = ?")
            .bind(project_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        migrations::run_migrations,
        pool::{create_pool, DatabaseConfig},
    };
    use serde_json::json;

    fn item(payload_json: &str) -> Item {
        Item {
            id: 1,
            project_id: 1,
            payload_json: payload_json.to_string(),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_payload_parses_stored_json() {
        let item = item(r#"{"text":"Good quality but expensive."}"#);
        assert_eq!(
            item.payload().unwrap(),
            json!({ "text": "Good quality but expensive." })
        );
    }

    #[test]
    fn test_payload_rejects_corrupt_json() {
        assert!(item("{not json").payload().is_err());
    }

    #[tokio::test]
    async fn test_create_stores_payload_as_json_text() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let payload = json!({ "text": "Καλή ποιότητα αλλά ακριβό.", "source": "demo" });
        let created = Item::create(
            &pool,
            CreateItem {
                project_id: 7,
                payload: payload.clone(),
            },
        )
        .await
        .unwrap();

        let found = Item::find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found.project_id, 7);
        assert_eq!(found.payload_json, created.payload_json);
        assert_eq!(found.payload().unwrap(), payload);
        assert!(found.payload_json.contains("Καλή ποιότητα"));

        assert!(Item::find_by_id(&pool, created.id + 1).await.unwrap().is_none());
    }
}
