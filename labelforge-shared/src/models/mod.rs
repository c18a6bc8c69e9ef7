/// Database models for LabelForge
///
/// # Models
///
/// - `user`: People who submit labels
/// - `project`: Named collections of items
/// - `item`: Units of content, plus the next-unlabeled-item selector
/// - `label`: Append-only label records, plus the export join
///
/// # Example
///
/// ```no_run
/// use labelforge_shared::models::label::{CreateLabel, Label};
/// # use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// Label::create(
///     &pool,
///     CreateLabel {
///         item_id: 3,
///         user_id: 1,
///         label: "positive".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod item;
pub mod label;
pub mod project;
pub mod user;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Row counts of the four tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub users: i64,
    pub projects: i64,
    pub items: i64,
    pub labels: i64,
}

impl StoreCounts {
    pub async fn fetch(pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            users: user::User::count(pool).await?,
            projects: project::Project::count(pool).await?,
            items: item::Item::count(pool).await?,
            labels: label::Label::count(pool).await?,
        })
    }
}
