use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use std::sync::Arc;

use crate::core::error::AppError;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::access::guards::RequireSession;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::constants::MSG_DELETED;
use crate::shared::types::{ApiResponse, Meta};

// ============================================================================
// View
// ============================================================================

/// Load the worksheet and return the filtered dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard/reports",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Filtered dashboard", body = ApiResponse<DashboardViewDto>),
        (status = 400, description = "Search is not available for this layout"),
        (status = 401, description = "Login required"),
        (status = 502, description = "Spreadsheet unavailable")
    ),
    security(("session" = [])),
    tag = "dashboard"
)]
pub async fn get_reports(
    _session: RequireSession,
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardViewDto>>, AppError> {
    let view = service.view(query.into()).await?;
    let total = view.visible_rows as i64;
    let message = view.message.clone();
    Ok(Json(ApiResponse::success(
        Some(view),
        message,
        Some(Meta { total }),
    )))
}

// ============================================================================
// Export
// ============================================================================

/// Download the filtered dashboard as CSV
#[utoipa::path(
    get,
    path = "/api/dashboard/export",
    params(DashboardQuery),
    responses(
        (status = 200, description = "UTF-8 CSV with BOM", body = String, content_type = "text/csv"),
        (status = 401, description = "Login required"),
        (status = 404, description = "Export is not available for this layout"),
        (status = 502, description = "Spreadsheet unavailable")
    ),
    security(("session" = [])),
    tag = "dashboard"
)]
pub async fn export_reports(
    _session: RequireSession,
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Response, AppError> {
    let file = service
        .export_csv(query.into(), Local::now().date_naive())
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, file.content_disposition()),
        ],
        file.content,
    )
        .into_response())
}

// ============================================================================
// Deletion
// ============================================================================

/// Delete selected rows and return the reloaded dashboard
///
/// Filters in the query string shape the returned dashboard only.
#[utoipa::path(
    post,
    path = "/api/dashboard/delete",
    params(DashboardQuery),
    request_body = DeleteReportsDto,
    responses(
        (status = 200, description = "Rows deleted", body = ApiResponse<DeleteReportsResponseDto>),
        (status = 400, description = "Nothing selected"),
        (status = 401, description = "Login required"),
        (status = 404, description = "Delete is not available for this layout"),
        (status = 409, description = "Selected rows changed since they were listed"),
        (status = 502, description = "Spreadsheet unavailable")
    ),
    security(("session" = [])),
    tag = "dashboard"
)]
pub async fn delete_reports(
    _session: RequireSession,
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<DashboardQuery>,
    AppJson(dto): AppJson<DeleteReportsDto>,
) -> Result<Json<ApiResponse<DeleteReportsResponseDto>>, AppError> {
    let deleted = service.delete(&dto.ids).await?;
    let dashboard = service.view(query.into()).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteReportsResponseDto { deleted, dashboard }),
        Some(MSG_DELETED.to_string()),
        None,
    )))
}
