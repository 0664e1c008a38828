use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::access::guards::RequireSession;
use crate::features::dashboard::dtos::DashboardFilter;
use crate::features::dashboard::DashboardService;
use crate::features::reports::dtos::{CreateReportDto, ReportOptionsDto, SubmitReportResponseDto};
use crate::features::reports::services::ReportService;
use crate::shared::constants::MSG_SUBMITTED;
use crate::shared::types::ApiResponse;

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub dashboard_service: Arc<DashboardService>,
}

/// Submit a report
///
/// Appends one row and returns it with the dashboard reloaded under the
/// default filter, so the caller never renders stale state.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<SubmitReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Login required"),
        (status = 502, description = "Spreadsheet unavailable")
    ),
    security(("session" = [])),
    tag = "reports"
)]
pub async fn create_report(
    _session: RequireSession,
    State(state): State<ReportState>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<SubmitReportResponseDto>>)> {
    let report = state.report_service.submit(dto).await?;
    let dashboard = state
        .dashboard_service
        .view(DashboardFilter::default())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(SubmitReportResponseDto { report, dashboard }),
            Some(MSG_SUBMITTED.to_string()),
            None,
        )),
    ))
}

/// Selector values for the form and the dashboard filters
#[utoipa::path(
    get,
    path = "/api/reports/options",
    responses(
        (status = 200, description = "Form options", body = ApiResponse<ReportOptionsDto>),
        (status = 401, description = "Login required")
    ),
    security(("session" = [])),
    tag = "reports"
)]
pub async fn get_options(
    _session: RequireSession,
    State(state): State<ReportState>,
) -> Json<ApiResponse<ReportOptionsDto>> {
    let options = ReportOptionsDto::from(state.report_service.schema());
    Json(ApiResponse::success(Some(options), None, None))
}
