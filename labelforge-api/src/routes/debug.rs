/// Development endpoints
///
/// # Endpoints
///
/// - `GET /debug/status` - row counts of users, projects, items and labels
/// - `GET /debug/seed_texts?project_id=1` - append the ten demo texts
///
/// Seeding is a GET so it can be triggered from a browser.

use crate::{app::AppState, error::ApiResult, extract::ApiQuery};
use axum::{
    extract::State,
    Json,
};
use labelforge_shared::{db::seed, models::StoreCounts, DEFAULT_PROJECT_ID};
use serde::{Deserialize, Serialize};

pub async fn status(State(state): State<AppState>) -> ApiResult<Json<StoreCounts>> {
    Ok(Json(StoreCounts::fetch(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct SeedTextsQuery {
    #[serde(default = "default_project_id")]
    pub project_id: i64,
}

fn default_project_id() -> i64 {
    DEFAULT_PROJECT_ID
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedTextsResponse {
    pub ok: bool,
    pub inserted: usize,
}

pub async fn seed_texts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SeedTextsQuery>,
) -> ApiResult<Json<SeedTextsResponse>> {
    let inserted = seed::seed_demo_texts(&state.db, query.project_id).await?;

    Ok(Json(SeedTextsResponse { ok: true, inserted }))
}
