use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::dashboard::DashboardService;
use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
///
/// All routes require a session.
pub fn routes(
    report_service: Arc<ReportService>,
    dashboard_service: Arc<DashboardService>,
) -> Router {
    let state = ReportState {
        report_service,
        dashboard_service,
    };

    Router::new()
        .route("/api/reports", post(handlers::create_report))
        .route("/api/reports/options", get(handlers::get_options))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::features::reports::dtos::{ReportOptionsDto, SubmitReportResponseDto};
    use crate::features::reports::models::ReportLayout;
    use crate::modules::sheets::ReportStore;
    use crate::shared::test_helpers::{field_report, test_server, TEST_PASSWORD};
    use crate::shared::types::ApiResponse;

    async fn login(server: &TestServer) {
        server
            .post("/api/session")
            .json(&json!({ "password": TEST_PASSWORD }))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_submit_requires_session() {
        let (server, store) = test_server(ReportLayout::Field, vec![]);

        server
            .post("/api/reports")
            .json(&json!({
                "branch": "1센터",
                "category": "현장영업",
                "status": "진행중",
                "content": "테스트"
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_returns_report_and_reloaded_dashboard() {
        let (server, store) = test_server(
            ReportLayout::Field,
            vec![field_report("2026-10-18 09:00", "2센터", "팀내이슈", "진행중", "기존 보고")],
        );
        login(&server).await;

        let response = server
            .post("/api/reports")
            .json(&json!({
                "branch": "1센터",
                "category": "현장영업",
                "priority": "긴급 🔥",
                "status": "진행중",
                "content": "테스트"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<ApiResponse<SubmitReportResponseDto>>();
        assert_eq!(body.message.as_deref(), Some("제출 완료!"));
        let data = body.data.unwrap();
        assert_eq!(data.report.priority.as_deref(), Some("긴급 🔥"));
        assert_eq!(data.dashboard.total_rows, 2);
        assert_eq!(data.dashboard.visible_rows, 2);
        assert!(data
            .dashboard
            .rows
            .iter()
            .any(|row| row.report.content == "테스트"));

        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_content_is_rejected_without_write() {
        let (server, store) = test_server(ReportLayout::Daily, vec![]);
        login(&server).await;

        let response = server
            .post("/api/reports")
            .json(&json!({
                "branch": "1센터",
                "category": "일반방문",
                "status": "완료",
                "content": "   "
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ApiResponse<()>>();
        assert_eq!(body.message.as_deref(), Some("내용을 입력해주세요."));

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_options_follow_layout() {
        let (server, _store) = test_server(ReportLayout::Daily, vec![]);
        login(&server).await;

        let options = server
            .get("/api/reports/options")
            .await
            .json::<ApiResponse<ReportOptionsDto>>()
            .data
            .unwrap();

        assert_eq!(options.layout, ReportLayout::Daily);
        assert_eq!(options.statuses, vec!["완료", "진행중", "이슈"]);
        assert!(options.priorities.is_empty());
        assert!(options.accepts_date);
        assert!(options.supports_export);
        assert_eq!(options.default_statuses, vec!["진행중"]);
    }
}
