use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::access::handlers;
use crate::features::access::services::AccessService;

/// Create routes for the password gate
///
/// Note: These routes are public; they are how a caller becomes authenticated.
pub fn routes(service: Arc<AccessService>) -> Router {
    Router::new()
        .route(
            "/api/session",
            get(handlers::get_session)
                .post(handlers::login)
                .delete(handlers::logout),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderValue, StatusCode};
    use serde_json::json;

    use crate::features::access::dtos::{SessionResponseDto, SessionStatusDto};
    use crate::features::reports::models::ReportLayout;
    use crate::shared::test_helpers::{test_server, TEST_PASSWORD};
    use crate::shared::types::ApiResponse;

    #[tokio::test]
    async fn test_wrong_password_opens_no_session() {
        let (server, _store) = test_server(ReportLayout::Field, vec![]);

        let response = server
            .post("/api/session")
            .json(&json!({ "password": "0000" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body = response.json::<ApiResponse<()>>();
        assert_eq!(body.message.as_deref(), Some("비밀번호가 틀렸습니다."));

        let status = server
            .get("/api/session")
            .await
            .json::<ApiResponse<SessionStatusDto>>();
        assert!(!status.data.unwrap().authenticated);
    }

    #[tokio::test]
    async fn test_empty_password_is_a_validation_error() {
        let (server, _store) = test_server(ReportLayout::Field, vec![]);

        server
            .post("/api/session")
            .json(&json!({ "password": "" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_sets_cookie_and_logout_clears_it() {
        let (server, _store) = test_server(ReportLayout::Field, vec![]);

        let response = server
            .post("/api/session")
            .json(&json!({ "password": TEST_PASSWORD }))
            .await;
        response.assert_status_ok();
        let set_cookie = response.header(header::SET_COOKIE);
        let set_cookie = set_cookie.to_str().unwrap();
        assert!(set_cookie.starts_with("report_session="));
        assert!(set_cookie.contains("HttpOnly"));

        let status = server
            .get("/api/session")
            .await
            .json::<ApiResponse<SessionStatusDto>>();
        assert!(status.data.unwrap().authenticated);

        server.delete("/api/session").await.assert_status_ok();

        let status = server
            .get("/api/session")
            .await
            .json::<ApiResponse<SessionStatusDto>>();
        assert!(!status.data.unwrap().authenticated);
    }

    #[tokio::test]
    async fn test_bearer_token_authenticates() {
        let (server, _store) = test_server(ReportLayout::Field, vec![]);

        let session = server
            .post("/api/session")
            .do_not_save_cookies()
            .json(&json!({ "password": TEST_PASSWORD }))
            .await
            .json::<ApiResponse<SessionResponseDto>>()
            .data
            .unwrap();
        assert_eq!(session.expires_in, 3600);

        server
            .get("/api/reports/options")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let bearer = HeaderValue::from_str(&format!("Bearer {}", session.token)).unwrap();
        server
            .get("/api/reports/options")
            .add_header(header::AUTHORIZATION, bearer)
            .await
            .assert_status_ok();

        let forged = HeaderValue::from_str(&format!("Bearer {}0", session.token)).unwrap();
        server
            .get("/api/reports/options")
            .add_header(header::AUTHORIZATION, forged)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
