use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{cookie::CookieJar, Form};

use crate::core::error::AppError;
use crate::core::extractor::AppQuery;
use crate::features::access::model::SessionContext;
use crate::features::access::{expired_session_cookie, session_cookie, AccessService};
use crate::features::dashboard::dtos::{DashboardFilter, DashboardQuery};
use crate::features::dashboard::DashboardService;
use crate::features::pages::dtos::{
    DeleteForm, Flash, LoginForm, PageContext, PageQuery, ReportForm, Tab,
};
use crate::features::pages::services::{
    filter_query, PageService, NOTICE_DELETED, NOTICE_SUBMITTED,
};
use crate::features::reports::ReportService;
use crate::shared::templates::render_template;

const INDEX_TEMPLATE: &str = "pages/index.html.jinja";

/// State for page handlers
#[derive(Clone)]
pub struct PageState {
    pub pages: Arc<PageService>,
    pub access: Arc<AccessService>,
    pub report_service: Arc<ReportService>,
    pub dashboard_service: Arc<DashboardService>,
}

fn render(status: StatusCode, context: &PageContext) -> Response {
    match render_template(INDEX_TEMPLATE, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::Internal(e.to_string()).into_response(),
    }
}

/// Password prompt or, once authenticated, the form and dashboard tabs
pub async fn index(
    session: SessionContext,
    State(state): State<PageState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Response {
    if !session.authenticated {
        return render(StatusCode::OK, &state.pages.login_page(None));
    }

    let flash = Flash::from_notice(query.notice.as_deref());
    let (status, context) = state
        .pages
        .app_page(query.tab, query.dashboard_query(), flash, None)
        .await;
    render(status, &context)
}

/// Check the password; on success set the cookie and start over from the top
pub async fn login(
    State(state): State<PageState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.access.login(&form.password) {
        Ok(session) => {
            let cookie = session_cookie(session.token, state.access.cookie_secure());
            (jar.add(cookie), Redirect::to("/")).into_response()
        }
        Err(e) => render(
            e.status_code(),
            &state.pages.login_page(Some(e.user_message())),
        ),
    }
}

pub async fn logout(jar: CookieJar) -> Response {
    (jar.remove(expired_session_cookie()), Redirect::to("/")).into_response()
}

/// Submit the form tab; a rejected submission re-renders with the input kept
pub async fn submit_report(
    session: SessionContext,
    State(state): State<PageState>,
    Form(form): Form<ReportForm>,
) -> Response {
    if !session.authenticated {
        return Redirect::to("/").into_response();
    }

    match state.report_service.submit(form.clone().into()).await {
        Ok(_) => Redirect::to(&format!("/?notice={}", NOTICE_SUBMITTED)).into_response(),
        Err(e) => {
            let (_, context) = state
                .pages
                .app_page(
                    Tab::Form,
                    DashboardQuery::default(),
                    Flash::from_error(&e),
                    Some(form),
                )
                .await;
            render(e.status_code(), &context)
        }
    }
}

/// Delete the checked dashboard rows, keeping the operator's filters either way
pub async fn delete_reports(
    session: SessionContext,
    State(state): State<PageState>,
    Form(form): Form<DeleteForm>,
) -> Response {
    if !session.authenticated {
        return Redirect::to("/").into_response();
    }

    let query = form.dashboard_query();
    match state.dashboard_service.delete(&form.ids).await {
        Ok(_) => {
            let filter = DashboardFilter::from(query);
            let location = format!(
                "/?tab=dashboard&notice={}&{}",
                NOTICE_DELETED,
                filter_query(&filter)
            );
            Redirect::to(&location).into_response()
        }
        Err(e) => {
            let (_, context) = state
                .pages
                .app_page(Tab::Dashboard, query, Flash::from_error(&e), None)
                .await;
            render(e.status_code(), &context)
        }
    }
}
