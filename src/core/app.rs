use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;

use crate::core::config::{Config, StoreBackend, StoreConfig};
use crate::core::middleware;
use crate::features::access::{routes as access_routes, AccessService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::pages::{routes as pages_routes, PageService, PageState};
use crate::features::reports::models::{ReportLayout, ReportSchema};
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::modules::sheets::{CachedStore, MemoryStore, ReportStore, SheetsClient, StoreError};

/// Every service the routes depend on, wired once at startup
#[derive(Clone)]
pub struct Services {
    pub access: Arc<AccessService>,
    pub report_service: Arc<ReportService>,
    pub dashboard_service: Arc<DashboardService>,
    pub page_service: Arc<PageService>,
}

impl Services {
    pub fn new(config: &Config, store: Arc<dyn ReportStore>) -> Self {
        let schema = Arc::new(ReportSchema::new(
            config.report.layout,
            config.report.branches.clone(),
        ));

        let access = Arc::new(AccessService::new(config.access.clone()));
        let report_service = Arc::new(ReportService::new(store, schema));
        let dashboard_service = Arc::new(DashboardService::new(Arc::clone(&report_service)));
        let page_service = Arc::new(PageService::new(
            Arc::clone(&report_service),
            Arc::clone(&dashboard_service),
            config.report.title.clone(),
        ));

        Self {
            access,
            report_service,
            dashboard_service,
            page_service,
        }
    }
}

/// Build the configured store; the spreadsheet client sits behind the read cache
pub fn build_store(
    config: &StoreConfig,
    layout: ReportLayout,
) -> Result<Arc<dyn ReportStore>, StoreError> {
    match config.backend {
        StoreBackend::Sheets => {
            let ttl = config.cache_ttl.unwrap_or_else(|| layout.default_cache_ttl());
            tracing::info!(
                "Using spreadsheet store: spreadsheet={}, worksheet={}, cache_ttl={:?}",
                config.spreadsheet_id,
                config.worksheet,
                ttl
            );
            Ok(Arc::new(CachedStore::new(SheetsClient::new(config)?, ttl)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; reports are lost on restart");
            let schema = ReportSchema::new(layout, None);
            Ok(Arc::new(MemoryStore::new(schema.empty_table())))
        }
    }
}

/// Feature routes behind the session middleware.
///
/// Swagger, health and the HTTP layers are added by `main`.
pub fn router(services: &Services) -> Router {
    Router::new()
        .merge(access_routes::routes(Arc::clone(&services.access)))
        .merge(reports_routes::routes(
            Arc::clone(&services.report_service),
            Arc::clone(&services.dashboard_service),
        ))
        .merge(dashboard_routes::routes(Arc::clone(&services.dashboard_service)))
        .merge(pages_routes::routes(PageState {
            pages: Arc::clone(&services.page_service),
            access: Arc::clone(&services.access),
            report_service: Arc::clone(&services.report_service),
            dashboard_service: Arc::clone(&services.dashboard_service),
        }))
        .layer(from_fn_with_state(
            Arc::clone(&services.access),
            middleware::session_middleware,
        ))
}
