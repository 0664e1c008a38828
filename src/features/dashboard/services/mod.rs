mod dashboard_service;
mod filter;
mod row_id;

pub use dashboard_service::{DashboardService, ExportFile};
