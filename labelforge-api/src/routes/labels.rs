/// Label submission endpoint
///
/// Appends one label. Accepts GET so it can be driven from a browser address
/// bar, and POST for clients that prefer it; both read query parameters only.
///
/// # Endpoint
///
/// ```text
/// GET /labels/add?item_id=3&label=positive&user_id=1
/// ```
///
/// # Response
///
/// ```json
/// { "ok": true, "item_id": 3, "label": "positive" }
/// ```

use crate::{app::AppState, error::ApiResult, extract::ApiQuery};
use axum::{
    extract::State,
    Json,
};
use labelforge_shared::{
    models::label::{CreateLabel, Label},
    DEFAULT_USER_ID,
};
use serde::{Deserialize, Serialize};

/// Query parameters of `/labels/add`
#[derive(Debug, Deserialize)]
pub struct AddLabelQuery {
    pub item_id: i64,

    pub label: String,

    #[serde(default = "default_user_id")]
    pub user_id: i64,
}

fn default_user_id() -> i64 {
    DEFAULT_USER_ID
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddLabelResponse {
    pub ok: bool,
    pub item_id: i64,
    pub label: String,
}

pub async fn add_label(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AddLabelQuery>,
) -> ApiResult<Json<AddLabelResponse>> {
    let label = Label::create(
        &state.db,
        CreateLabel {
            item_id: query.item_id,
            user_id: query.user_id,
            label: query.label,
        },
    )
    .await?;

    tracing::info!(
        label_id = label.id,
        item_id = label.item_id,
        user_id = label.user_id,
        label = %label.label,
        "Label recorded"
    );

    Ok(Json(AddLabelResponse {
        ok: true,
        item_id: label.item_id,
        label: label.label,
    }))
}
