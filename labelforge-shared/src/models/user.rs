/// User model and database operations
///
/// Users exist so labels can be attributed; there is no login. The
/// `password_hash` column is kept for schema compatibility and is never read
/// back into the model.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL DEFAULT '',
///     role TEXT NOT NULL DEFAULT 'annotator',
///     created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A person who submits labels
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,

    /// Email address, unique across users
    pub email: String,

    /// Free-form role name, e.g. "admin" or "annotator"
    pub role: String,

    pub created_at: NaiveDateTime,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub role: String,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists or the insert fails
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, role)
            VALUES (?, ?)
            RETURNING id, email, role, created_at
            "#,
        )
        .bind(data.email)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, role, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address (exact match)
    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, role, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Counts total number of users
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
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
    async fn test_create_and_find_user() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let user = User::create(
            &pool,
            CreateUser {
                email: "annotator@example.com".to_string(),
                role: "annotator".to_string(),
            },
        )
        .await
        .unwrap();

        let by_id = User::find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "annotator@example.com");

        let by_email = User::find_by_email(&pool, "annotator@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);

        assert!(User::find_by_id(&pool, user.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let data = CreateUser {
            email: "dup@example.com".to_string(),
            role: "annotator".to_string(),
        };

        User::create(&pool, data.clone()).await.unwrap();
        assert!(User::create(&pool, data).await.is_err());
        assert_eq!(User::count(&pool).await.unwrap(), 1);
    }
}
