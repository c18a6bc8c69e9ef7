/// Export download endpoints
///
/// # Endpoints
///
/// - `GET /export/csv?project_id=1` - `labels.csv`, BOM + `text,label` header
/// - `GET /export/jsonl?project_id=1` - `labels.jsonl`, one object per line
///
/// Both are served as attachments. The whole export is rendered in memory.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiQuery,
};
use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use labelforge_shared::{
    export::{export_project, ExportFormat},
    DEFAULT_PROJECT_ID,
};
use serde::Deserialize;

/// Query parameters of the export endpoints
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_project_id")]
    pub project_id: i64,
}

fn default_project_id() -> i64 {
    DEFAULT_PROJECT_ID
}

pub async fn export_csv(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ExportQuery>,
) -> ApiResult<Response> {
    download(&state, query.project_id, ExportFormat::Csv).await
}

pub async fn export_jsonl(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ExportQuery>,
) -> ApiResult<Response> {
    download(&state, query.project_id, ExportFormat::Jsonl).await
}

async fn download(state: &AppState, project_id: i64, format: ExportFormat) -> ApiResult<Response> {
    let body = Bytes::from(export_project(&state.db, project_id, format).await?);

    let disposition = format!("attachment; filename={}", format.filename());
    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static(format.content_type()),
        ),
        (
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition).map_err(|e| {
                ApiError::InternalError(format!("Invalid disposition header: {}", e))
            })?,
        ),
    ];

    Ok((headers, body).into_response())
}
