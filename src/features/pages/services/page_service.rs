use axum::http::StatusCode;
use chrono::Local;
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::dashboard::dtos::{DashboardFilter, DashboardQuery};
use crate::features::dashboard::DashboardService;
use crate::features::pages::dtos::{Flash, PageContext, ReportForm, Tab};
use crate::features::reports::dtos::ReportOptionsDto;
use crate::features::reports::ReportService;
use crate::shared::constants::{MSG_DELETED, MSG_SUBMITTED};

/// Flash code appended to the redirect after a successful submission
pub const NOTICE_SUBMITTED: &str = "submitted";
/// Flash code appended to the redirect after a successful deletion
pub const NOTICE_DELETED: &str = "deleted";

impl Flash {
    /// Resolve a `notice` query code; unknown codes show nothing
    pub fn from_notice(code: Option<&str>) -> Self {
        let notice = match code {
            Some(NOTICE_SUBMITTED) => Some(MSG_SUBMITTED.to_string()),
            Some(NOTICE_DELETED) => Some(MSG_DELETED.to_string()),
            _ => None,
        };
        Self {
            notice,
            ..Default::default()
        }
    }

    /// User mistakes become warnings, everything else an error
    pub fn from_error(error: &AppError) -> Self {
        let message = error.user_message();
        match error {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::Conflict(_)
            | AppError::NotFound(_) => Self {
                warning: Some(message),
                ..Default::default()
            },
            _ => Self {
                error: Some(message),
                ..Default::default()
            },
        }
    }
}

/// Query string reproducing `filter`, for the export link and post-delete redirect.
///
/// An empty status selection is sent as a single blank `status=` so it is not
/// mistaken for "no filter given".
pub fn filter_query(filter: &DashboardFilter) -> String {
    let mut parts = Vec::new();
    if filter.show_confidential {
        parts.push("show_confidential=true".to_string());
    }
    if filter.statuses.is_empty() {
        parts.push("status=".to_string());
    }
    for status in &filter.statuses {
        parts.push(format!("status={}", urlencoding::encode(status)));
    }
    for branch in &filter.branches {
        parts.push(format!("branch={}", urlencoding::encode(branch)));
    }
    if let Some(q) = &filter.search {
        parts.push(format!("q={}", urlencoding::encode(q)));
    }
    parts.join("&")
}

/// Builds the page state for the HTML surface
pub struct PageService {
    reports: Arc<ReportService>,
    dashboard: Arc<DashboardService>,
    title: String,
}

impl PageService {
    pub fn new(
        reports: Arc<ReportService>,
        dashboard: Arc<DashboardService>,
        title: String,
    ) -> Self {
        Self {
            reports,
            dashboard,
            title,
        }
    }

    /// Password prompt, optionally with the reason the last attempt failed
    pub fn login_page(&self, error: Option<String>) -> PageContext {
        PageContext {
            title: self.title.clone(),
            authenticated: false,
            tab: Tab::Form,
            flash: Flash {
                error,
                ..Default::default()
            },
            options: None,
            draft: None,
            dashboard: None,
            filter: DashboardFilter::default(),
            export_href: None,
            today: Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Both tabs, with the dashboard reloaded from the store.
    ///
    /// A failed load keeps the page up with the error shown and no table.
    pub async fn app_page(
        &self,
        tab: Tab,
        query: DashboardQuery,
        mut flash: Flash,
        draft: Option<ReportForm>,
    ) -> (StatusCode, PageContext) {
        let schema = self.reports.schema();
        let tools = schema.layout.supports_dashboard_tools();

        let mut filter = DashboardFilter::from(query);
        if !tools {
            filter.search = None;
        }

        let (status, dashboard) = match self.dashboard.view(filter.clone()).await {
            Ok(view) => (StatusCode::OK, Some(view)),
            Err(e) => {
                let status = e.status_code();
                if flash.error.is_none() {
                    flash.error = Some(e.user_message());
                }
                (status, None)
            }
        };

        let export_href =
            tools.then(|| format!("/api/dashboard/export?{}", filter_query(&filter)));

        let context = PageContext {
            title: self.title.clone(),
            authenticated: true,
            tab,
            flash,
            options: Some(ReportOptionsDto::from(schema)),
            draft,
            dashboard,
            filter,
            export_href,
            today: Local::now().format("%Y-%m-%d").to_string(),
        };

        (status, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportLayout;
    use crate::modules::sheets::ReportStore;
    use crate::shared::test_helpers::{daily_report, page_service};

    #[test]
    fn test_filter_query_keeps_every_filter() {
        let filter = DashboardFilter {
            show_confidential: true,
            statuses: vec!["진행중".into(), "이슈".into()],
            branches: vec!["1센터".into()],
            search: Some("a b".into()),
        };
        assert_eq!(
            filter_query(&filter),
            "show_confidential=true&status=%EC%A7%84%ED%96%89%EC%A4%91&status=%EC%9D%B4%EC%8A%88&branch=1%EC%84%BC%ED%84%B0&q=a%20b"
        );
    }

    #[test]
    fn test_filter_query_marks_all_statuses() {
        let filter = DashboardFilter {
            statuses: vec![],
            ..Default::default()
        };
        assert_eq!(filter_query(&filter), "status=");
    }

    #[test]
    fn test_flash_codes() {
        assert_eq!(
            Flash::from_notice(Some("submitted")).notice.as_deref(),
            Some(MSG_SUBMITTED)
        );
        assert_eq!(Flash::from_notice(Some("bogus")), Flash::default());

        let flash = Flash::from_error(&AppError::Validation("내용을 입력해주세요.".into()));
        assert_eq!(flash.warning.as_deref(), Some("내용을 입력해주세요."));
        assert!(flash.error.is_none());
    }

    #[tokio::test]
    async fn test_app_page_loads_dashboard() {
        let (pages, _store) = page_service(
            ReportLayout::Daily,
            vec![daily_report("2026-10-19", "1센터", "일반방문", "진행중", "방문")],
        );

        let (status, page) = pages
            .app_page(Tab::Dashboard, DashboardQuery::default(), Flash::default(), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(page.authenticated);
        assert_eq!(page.dashboard.map(|d| d.visible_rows), Some(1));
        assert_eq!(
            page.export_href.as_deref(),
            Some("/api/dashboard/export?status=%EC%A7%84%ED%96%89%EC%A4%91")
        );
    }

    #[tokio::test]
    async fn test_field_layout_ignores_search_and_hides_export() {
        let (pages, store) = page_service(ReportLayout::Field, vec![]);
        let query = DashboardQuery {
            q: Some("검색".into()),
            ..Default::default()
        };

        let (status, page) = pages
            .app_page(Tab::Dashboard, query, Flash::default(), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(page.filter.search, None);
        assert!(page.export_href.is_none());
        assert!(page.dashboard.map(|d| d.empty).unwrap_or(false));
        assert!(store.list().await.unwrap().is_empty());
    }
}
