use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::dashboard::dtos::DashboardViewDto;
use crate::features::reports::models::{Report, ReportLayout, ReportSchema};
use crate::shared::constants::{CONFIDENTIAL_CATEGORY, DEFAULT_STATUS_FILTER};
use crate::shared::validation::{validate_calendar_date, validate_not_blank};

/// Request DTO for submitting a report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    /// 지점/센터명
    #[validate(length(min = 1, message = "지점/센터명을 선택하세요."))]
    pub branch: String,

    /// 카테고리
    #[validate(length(min = 1, message = "카테고리를 선택하세요."))]
    pub category: String,

    /// 중요도 (`field` layout only, defaults to the first choice)
    #[serde(default)]
    pub priority: Option<String>,

    /// 진행상태
    #[validate(length(min = 1, message = "진행 상태를 선택하세요."))]
    pub status: String,

    /// Report body (required)
    #[validate(custom(function = "validate_not_blank", message = "내용을 입력해주세요."))]
    pub content: String,

    /// Report date `YYYY-MM-DD` (`daily` layout only, defaults to today)
    #[serde(default)]
    #[validate(custom(
        function = "validate_calendar_date",
        message = "날짜는 YYYY-MM-DD 형식이어야 합니다."
    ))]
    pub date: Option<String>,
}

/// Response DTO after a successful submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitReportResponseDto {
    pub report: Report,
    /// Dashboard reloaded from the store after the write
    pub dashboard: DashboardViewDto,
}

/// Selector values for the submission form and dashboard filters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportOptionsDto {
    pub layout: ReportLayout,
    pub branches: Vec<String>,
    pub categories: Vec<String>,
    pub priorities: Vec<String>,
    pub statuses: Vec<String>,
    pub default_statuses: Vec<String>,
    pub confidential_category: String,
    pub accepts_date: bool,
    pub supports_search: bool,
    pub supports_export: bool,
    pub supports_delete: bool,
}

impl From<&ReportSchema> for ReportOptionsDto {
    fn from(schema: &ReportSchema) -> Self {
        let layout = schema.layout;
        let owned =
            |values: &[&str]| -> Vec<String> { values.iter().map(|v| v.to_string()).collect() };
        Self {
            layout,
            branches: schema.branches.clone(),
            categories: owned(layout.categories()),
            priorities: owned(layout.priorities()),
            statuses: owned(layout.statuses()),
            default_statuses: vec![DEFAULT_STATUS_FILTER.to_string()],
            confidential_category: CONFIDENTIAL_CATEGORY.to_string(),
            accepts_date: layout.accepts_client_date(),
            supports_search: layout.supports_dashboard_tools(),
            supports_export: layout.supports_dashboard_tools(),
            supports_delete: layout.supports_dashboard_tools(),
        }
    }
}
