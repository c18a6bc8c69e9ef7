/// Label model: an append-only record of one user's judgment on one item
///
/// Labels are never updated or deleted. Nothing checks that the referenced
/// item or user exists, that the pair is new, or that the value belongs to
/// any vocabulary.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE labels (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     item_id INTEGER NOT NULL REFERENCES items(id),
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     label TEXT NOT NULL,
///     created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Label {
    pub id: i64,
    pub item_id: i64,
    pub user_id: i64,

    /// Label value, e.g. "positive"
    pub label: String,

    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLabel {
    pub item_id: i64,
    pub user_id: i64,
    pub label: String,
}

/// One joined (item, label) pair of a project, as read for export
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LabeledItemRow {
    pub item_id: i64,
    pub payload_json: String,
    pub label: String,
}

impl Label {
    /// Appends a label
    ///
    /// Afterwards the item no longer comes back from
    /// [`Item::next_unlabeled`](crate::models::item::Item::next_unlabeled)
    /// for this user.
    pub async fn create(pool: &SqlitePool, data: CreateLabel) -> Result<Self, sqlx::Error> {
        let label = sqlx::query_as::<_, Label>(
            r#"
            INSERT INTO labels (item_id, user_id, label)
            VALUES (?, ?, ?)
            RETURNING id, item_id, user_id, label, created_at
            "#,
        )
        .bind(data.item_id)
        .bind(data.user_id)
        .bind(data.label)
        .fetch_one(pool)
        .await?;

        Ok(label)
    }

    /// Lists the labels attached to one item, oldest first
    pub async fn list_by_item(pool: &SqlitePool, item_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let labels = sqlx::query_as::<_, Label>(
            r#"
            SELECT id, item_id, user_id, label, created_at
            FROM labels
            WHERE item_id = ?
            ORDER BY id
            "#,
        )
        .bind(item_id)
        .fetch_all(pool)
        .await?;

        Ok(labels)
    }

    /// Reads every (item, label) pair of a project
    ///
    /// Inner join: unlabeled items are skipped and an item with several labels
    /// yields one row per label. Rows are ordered by item id, then label id.
    pub async fn labeled_items(
        pool: &SqlitePool,
        project_id: i64,
    ) -> Result<Vec<LabeledItemRow>, sqlx::Error> {
        let rows = sqlx::query_as::<_, LabeledItemRow>(
            r#"
            SELECT i.id AS item_id, i.payload_json, l.label
            FROM items i
            JOIN labels l ON l.item_id = i.id
            WHERE i.project_id = ?
            ORDER BY i.id, l.id
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM labels")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
