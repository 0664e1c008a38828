use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::access::{
    dtos as access_dtos, handlers as access_handlers, model as access_model,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Session
        access_handlers::login,
        access_handlers::get_session,
        access_handlers::logout,
        // Reports
        reports_handlers::create_report,
        reports_handlers::get_options,
        // Dashboard
        dashboard_handlers::get_reports,
        dashboard_handlers::export_reports,
        dashboard_handlers::delete_reports,
    ),
    components(
        schemas(
            Meta,
            // Session
            access_model::SessionContext,
            access_dtos::LoginRequestDto,
            access_dtos::SessionResponseDto,
            access_dtos::SessionStatusDto,
            ApiResponse<access_dtos::SessionResponseDto>,
            ApiResponse<access_dtos::SessionStatusDto>,
            // Reports
            reports_models::ReportLayout,
            reports_models::Report,
            reports_dtos::CreateReportDto,
            reports_dtos::SubmitReportResponseDto,
            reports_dtos::ReportOptionsDto,
            ApiResponse<reports_dtos::SubmitReportResponseDto>,
            ApiResponse<reports_dtos::ReportOptionsDto>,
            // Dashboard
            dashboard_dtos::DashboardFilter,
            dashboard_dtos::DashboardRowDto,
            dashboard_dtos::DashboardViewDto,
            dashboard_dtos::DeleteReportsDto,
            dashboard_dtos::DeleteReportsResponseDto,
            ApiResponse<dashboard_dtos::DashboardViewDto>,
            ApiResponse<dashboard_dtos::DeleteReportsResponseDto>,
        )
    ),
    tags(
        (name = "session", description = "Shared-password gate"),
        (name = "reports", description = "Report submission"),
        (name = "dashboard", description = "Filtered report table, CSV export and deletion"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Field Report API",
        version = "0.1.0",
        description = "API documentation for the field report service",
    )
)]
pub struct ApiDoc;

/// Adds the session token security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("session token")
                        .description(Some(
                            "Token from POST /api/session; browsers send the report_session cookie instead",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
