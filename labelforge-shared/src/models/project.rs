/// Project model: a named collection of items sharing one labeling task
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     name TEXT NOT NULL,
///     type TEXT NOT NULL DEFAULT 'text',
///     created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,

    pub name: String,

    /// Kind of content the project labels, e.g. "text"
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,

    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,
}

impl Project {
    pub async fn create(pool: &SqlitePool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, type)
            VALUES (?, ?)
            RETURNING id, name, type, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.kind)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, name, type, created_at FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects, oldest first
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, name, type, created_at FROM projects ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
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

    #[tokio::test]
    async fn test_create_and_list_projects() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let first = Project::create(
            &pool,
            CreateProject {
                name: "Sentiment".to_string(),
                kind: "text".to_string(),
            },
        )
        .await
        .unwrap();
        let second = Project::create(
            &pool,
            CreateProject {
                name: "Topics".to_string(),
                kind: "text".to_string(),
            },
        )
        .await
        .unwrap();

        let projects = Project::list(&pool).await.unwrap();
        let ids: Vec<i64> = projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        let found = Project::find_by_id(&pool, second.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Topics");
    }

    #[test]
    fn test_project_serializes_kind_as_type() {
        let data = CreateProject {
            name: "Demo".to_string(),
            kind: "text".to_string(),
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["type"], "text");
        assert!(value.get("kind").is_none());
    }
}
