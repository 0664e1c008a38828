use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create dashboard routes
///
/// Every route requires a session (enforced by `RequireSession` in the handlers).
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/reports", get(handlers::get_reports))
        .route("/api/dashboard/export", get(handlers::export_reports))
        .route("/api/dashboard/delete", post(handlers::delete_reports))
        .with_state(dashboard_service)
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::features::dashboard::dtos::{DashboardViewDto, DeleteReportsResponseDto};
    use crate::features::reports::models::{Report, ReportLayout};
    use crate::modules::sheets::ReportStore;
    use crate::shared::test_helpers::{daily_report, test_server, TEST_PASSWORD};
    use crate::shared::types::ApiResponse;

    fn daily_rows() -> Vec<Report> {
        vec![
            daily_report("2026-10-19", "1센터", "일반방문", "진행중", "Tire rotation"),
            daily_report("2026-10-18", "2센터", "현장영업", "완료", "계약 체결"),
            daily_report("2026-10-17", "3센터", "팀내이슈", "이슈", "장비 고장"),
            daily_report("2026-10-16", "1센터", "개인/보안(비공개)", "진행중", "비공개 메모"),
        ]
    }

    async fn logged_in(layout: ReportLayout, reports: Vec<Report>) -> TestServer {
        let (server, _store) = test_server(layout, reports);
        server
            .post("/api/session")
            .json(&json!({ "password": TEST_PASSWORD }))
            .await
            .assert_status_ok();
        server
    }

    #[tokio::test]
    async fn test_view_requires_session() {
        let (server, _store) = test_server(ReportLayout::Daily, daily_rows());
        server
            .get("/api/dashboard/reports")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_default_view_shows_open_non_confidential_rows() {
        let server = logged_in(ReportLayout::Daily, daily_rows()).await;

        let view = server
            .get("/api/dashboard/reports")
            .await
            .json::<ApiResponse<DashboardViewDto>>()
            .data
            .unwrap();

        assert_eq!(view.total_rows, 4);
        assert_eq!(view.visible_rows, 1);
        assert_eq!(view.rows[0].report.content, "Tire rotation");
        assert_eq!(
            view.columns,
            vec!["날짜", "센터명", "카테고리", "진행상태", "내용", "등록시간"]
        );
    }

    #[tokio::test]
    async fn test_repeated_query_keys_filter_the_view() {
        let server = logged_in(ReportLayout::Daily, daily_rows()).await;

        let view = server
            .get("/api/dashboard/reports")
            .add_query_param("status", "완료")
            .add_query_param("status", "이슈")
            .add_query_param("branch", "3센터")
            .await
            .json::<ApiResponse<DashboardViewDto>>()
            .data
            .unwrap();
        assert_eq!(view.visible_rows, 1);
        assert_eq!(view.rows[0].report.content, "장비 고장");

        let view = server
            .get("/api/dashboard/reports")
            .add_query_param("status", "")
            .add_query_param("show_confidential", "true")
            .add_query_param("q", "TIRE")
            .await
            .json::<ApiResponse<DashboardViewDto>>()
            .data
            .unwrap();
        assert_eq!(view.visible_rows, 1);
        assert_eq!(view.rows[0].report.branch, "1센터");
    }

    #[tokio::test]
    async fn test_lone_blank_status_shows_every_status() {
        let server = logged_in(ReportLayout::Daily, daily_rows()).await;

        let view = server
            .get("/api/dashboard/reports?status=")
            .await
            .json::<ApiResponse<DashboardViewDto>>()
            .data
            .unwrap();

        assert!(view.filter.statuses.is_empty());
        assert_eq!(view.visible_rows, 3);
    }

    #[tokio::test]
    async fn test_export_is_utf8_csv_with_bom() {
        let server = logged_in(ReportLayout::Daily, daily_rows()).await;

        let response = server
            .get("/api/dashboard/export")
            .add_query_param("status", "")
            .await;
        response.assert_status_ok();

        let content_type = response.header(header::CONTENT_TYPE);
        assert_eq!(content_type.to_str().unwrap(), "text/csv; charset=utf-8");
        let disposition = response.header(header::CONTENT_DISPOSITION);
        let disposition = disposition.to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"reports_"));
        assert!(disposition.contains("filename*=UTF-8''%EC%97%85%EB%AC%B4%EB%B3%B4%EA%B3%A0_"));

        let bytes = response.as_bytes();
        assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("날짜,센터명,카테고리,진행상태,내용,등록시간"));
        assert_eq!(lines.count(), 3);
    }

    #[tokio::test]
    async fn test_delete_removes_selected_rows() {
        let (server, store) = test_server(ReportLayout::Daily, daily_rows());
        server
            .post("/api/session")
            .json(&json!({ "password": TEST_PASSWORD }))
            .await
            .assert_status_ok();

        let view = server
            .get("/api/dashboard/reports")
            .add_query_param("status", "")
            .await
            .json::<ApiResponse<DashboardViewDto>>()
            .data
            .unwrap();
        let target = view
            .rows
            .iter()
            .find(|row| row.report.content == "계약 체결")
            .unwrap()
            .id
            .clone();

        let response = server
            .post("/api/dashboard/delete")
            .add_query_param("status", "")
            .json(&json!({ "ids": [target] }))
            .await;
        response.assert_status_ok();
        let data = response
            .json::<ApiResponse<DeleteReportsResponseDto>>()
            .data
            .unwrap();
        assert_eq!(data.deleted, 1);
        assert_eq!(data.dashboard.total_rows, 3);
        assert!(data.dashboard.rows.iter().all(|row| row.id != target));
        assert_eq!(store.list().await.unwrap().len(), 3);

        // The id is gone now; a second attempt must not write anything.
        server
            .post("/api/dashboard/delete")
            .json(&json!({ "ids": [target] }))
            .await
            .assert_status(StatusCode::CONFLICT);
        assert_eq!(store.list().await.unwrap().len(), 3);

        server
            .post("/api/dashboard/delete")
            .json(&json!({ "ids": [] }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_field_layout_has_no_tools() {
        let server = logged_in(ReportLayout::Field, vec![]).await;

        let view = server
            .get("/api/dashboard/reports")
            .await
            .json::<ApiResponse<DashboardViewDto>>()
            .data
            .unwrap();
        assert!(view.empty);
        assert_eq!(view.message.as_deref(), Some("데이터가 없습니다."));

        server
            .get("/api/dashboard/reports")
            .add_query_param("q", "검색")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/api/dashboard/export")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .post("/api/dashboard/delete")
            .json(&json!({ "ids": ["abc-0"] }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
