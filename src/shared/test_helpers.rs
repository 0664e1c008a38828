use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;

use crate::core::app::{router, Services};
use crate::core::config::{
    AccessConfig, AppConfig, Config, ReportConfig, StoreBackend, StoreConfig, SwaggerConfig,
};
use crate::features::dashboard::DashboardService;
use crate::features::pages::PageService;
use crate::features::reports::dtos::CreateReportDto;
use crate::features::reports::models::{Report, ReportLayout, ReportSchema};
use crate::features::reports::ReportService;
use crate::modules::sheets::{MemoryStore, ReportStore, StoreError, Table};

pub const TEST_PASSWORD: &str = "1234";

pub fn test_access_config() -> AccessConfig {
    AccessConfig {
        password: TEST_PASSWORD.to_string(),
        session_secret: "test-session-secret-0123456789".to_string(),
        session_ttl: Duration::from_secs(3600),
        cookie_secure: false,
    }
}

pub fn test_config(layout: ReportLayout) -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
        },
        access: test_access_config(),
        store: StoreConfig {
            backend: StoreBackend::Memory,
            api_base: "http://127.0.0.1:9".to_string(),
            spreadsheet_id: "test-sheet".to_string(),
            access_token: "test-token".to_string(),
            worksheet: "시트1".to_string(),
            timeout: Duration::from_secs(1),
            cache_ttl: None,
        },
        report: ReportConfig {
            layout,
            branches: None,
            title: "업무 보고".to_string(),
        },
        swagger: SwaggerConfig {
            username: None,
            password: None,
            title: "Field Report API".to_string(),
            version: "0.1.0".to_string(),
            description: "test".to_string(),
        },
    }
}

pub fn field_report(
    timestamp: &str,
    branch: &str,
    category: &str,
    status: &str,
    content: &str,
) -> Report {
    Report {
        timestamp: timestamp.to_string(),
        branch: branch.to_string(),
        category: category.to_string(),
        priority: Some("보통".to_string()),
        status: status.to_string(),
        content: content.to_string(),
        feedback: Some(String::new()),
        registered_at: None,
    }
}

pub fn daily_report(date: &str, branch: &str, category: &str, status: &str, content: &str) -> Report {
    Report {
        timestamp: date.to_string(),
        branch: branch.to_string(),
        category: category.to_string(),
        priority: None,
        status: status.to_string(),
        content: content.to_string(),
        feedback: None,
        registered_at: Some(format!("{} 09:00:00", date)),
    }
}

pub fn create_dto(branch: &str, category: &str, status: &str, content: &str) -> CreateReportDto {
    CreateReportDto {
        branch: branch.to_string(),
        category: category.to_string(),
        priority: None,
        status: status.to_string(),
        content: content.to_string(),
        date: None,
    }
}

/// Memory store pre-filled with `reports` in the layout's column order
pub fn seeded_store(layout: ReportLayout, reports: &[Report]) -> Arc<MemoryStore> {
    let schema = ReportSchema::new(layout, None);
    Arc::new(MemoryStore::new(schema.encode(reports)))
}

pub fn report_service(
    layout: ReportLayout,
    reports: Vec<Report>,
) -> (ReportService, Arc<MemoryStore>) {
    let store = seeded_store(layout, &reports);
    let service = ReportService::new(
        store.clone() as Arc<dyn ReportStore>,
        Arc::new(ReportSchema::new(layout, None)),
    );
    (service, store)
}

pub fn dashboard_service(
    layout: ReportLayout,
    reports: Vec<Report>,
) -> (DashboardService, Arc<MemoryStore>) {
    let (reports, store) = report_service(layout, reports);
    (DashboardService::new(Arc::new(reports)), store)
}

pub fn page_service(layout: ReportLayout, reports: Vec<Report>) -> (PageService, Arc<MemoryStore>) {
    let (reports, store) = report_service(layout, reports);
    let reports = Arc::new(reports);
    let dashboard = Arc::new(DashboardService::new(Arc::clone(&reports)));
    (
        PageService::new(reports, dashboard, "업무 보고".to_string()),
        store,
    )
}

/// Full router over a seeded memory store
pub fn test_server(layout: ReportLayout, reports: Vec<Report>) -> (TestServer, Arc<MemoryStore>) {
    let store = seeded_store(layout, &reports);
    let services = Services::new(&test_config(layout), store.clone() as Arc<dyn ReportStore>);
    let server = TestServer::builder()
        .save_cookies()
        .build(router(&services))
        .expect("failed to start test server");
    (server, store)
}

/// Store whose every call fails like an unreachable spreadsheet
pub struct FailingStore;

#[async_trait]
impl ReportStore for FailingStore {
    async fn list(&self) -> Result<Table, StoreError> {
        Err(StoreError::Request("connection refused".to_string()))
    }

    async fn replace_all(&self, _table: Table) -> Result<(), StoreError> {
        Err(StoreError::Request("connection refused".to_string()))
    }
}
