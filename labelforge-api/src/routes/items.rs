/// Next-item endpoint
///
/// Hands a user the lowest-id item of a project they have not labeled yet.
///
/// # Endpoint
///
/// ```text
/// GET /items/next?user_id=1&project_id=1
/// ```
///
/// # Response
///
/// ```json
/// { "done": false, "item_id": 3, "payload": { "text": "Good quality but expensive." } }
/// ```
///
/// or, once every item is labeled:
///
/// ```json
/// { "done": true }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiQuery,
};
use axum::{extract::State, Json};
use labelforge_shared::{models::item::Item, DEFAULT_PROJECT_ID, DEFAULT_USER_ID};
use serde::{Deserialize, Serialize};

/// Query parameters of `GET /items/next`
#[derive(Debug, Deserialize)]
pub struct NextItemQuery {
    #[serde(default = "default_user_id")]
    pub user_id: i64,

    #[serde(default = "default_project_id")]
    pub project_id: i64,
}

fn default_user_id() -> i64 {
    DEFAULT_USER_ID
}

fn default_project_id() -> i64 {
    DEFAULT_PROJECT_ID
}

/// Response of `GET /items/next`
#[derive(Debug, Serialize, Deserialize)]
pub struct NextItemResponse {
    /// True when the user has nothing left to label
    pub done: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl NextItemResponse {
    fn done() -> Self {
        Self {
            done: true,
            item_id: None,
            payload: None,
        }
    }
}

pub async fn next_item(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NextItemQuery>,
) -> ApiResult<Json<NextItemResponse>> {
    let Some(item) = Item::next_unlabeled(&state.db, query.project_id, query.user_id).await? else {
        tracing::debug!(
            user_id = query.user_id,
            project_id = query.project_id,
            "No unlabeled items left"
        );
        return Ok(Json(NextItemResponse::done()));
    };

    let payload = item.payload().map_err(|e| {
        ApiError::InternalError(format!("Item {} has a malformed payload: {}", item.id, e))
    })?;

    Ok(Json(NextItemResponse {
        done: false,
        item_id: Some(item.id),
        payload: Some(payload),
    }))
}
