use axum::{
    routing::{get, post},
    Router,
};

use crate::features::pages::handlers::{self, PageState};

/// Create routes for the HTML surface
///
/// Handlers check the session themselves and fall back to the password prompt.
pub fn routes(state: PageState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/reports", post(handlers::submit_report))
        .route("/reports/delete", post(handlers::delete_reports))
        .with_state(state)
}
