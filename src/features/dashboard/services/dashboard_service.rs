use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::row_id::derive_ids;
use crate::features::reports::models::{Report, ReportSchema};
use crate::features::reports::ReportService;
use crate::shared::constants::MSG_NO_DATA;

/// UTF-8 byte order mark, so spreadsheet apps detect the encoding of Korean text
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A rendered CSV export
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    /// ASCII-only fallback for clients without RFC 5987 support
    pub ascii_filename: String,
    pub content: Vec<u8>,
    pub rows: usize,
}

impl ExportFile {
    /// `Content-Disposition` value carrying both filename forms
    pub fn content_disposition(&self) -> String {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            self.ascii_filename,
            urlencoding::encode(&self.filename)
        )
    }
}

/// Service for the dashboard tab: filtered view, export and deletion
pub struct DashboardService {
    reports: Arc<ReportService>,
}

impl DashboardService {
    pub fn new(reports: Arc<ReportService>) -> Self {
        Self { reports }
    }

    fn schema(&self) -> &ReportSchema {
        self.reports.schema()
    }

    fn ensure_tools(&self, action: &str) -> Result<()> {
        if self.schema().layout.supports_dashboard_tools() {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "{} is not available for this report layout",
                action
            )))
        }
    }

    fn check_filter(&self, filter: &DashboardFilter) -> Result<()> {
        if filter.search.is_some() && !self.schema().layout.supports_dashboard_tools() {
            return Err(AppError::BadRequest(
                "Search is not available for this report layout".to_string(),
            ));
        }
        Ok(())
    }

    /// Load the table and apply `filter`
    pub async fn view(&self, filter: DashboardFilter) -> Result<DashboardViewDto> {
        self.check_filter(&filter)?;
        let reports = self.reports.list().await?;
        Ok(build_view(self.schema(), &reports, filter))
    }

    /// Render the filtered view as CSV
    pub async fn export_csv(&self, filter: DashboardFilter, today: NaiveDate) -> Result<ExportFile> {
        self.ensure_tools("Export")?;
        let view = self.view(filter).await?;

        let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
        writer
            .write_record(&view.columns)
            .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;
        for row in &view.rows {
            writer
                .write_record(&row.cells)
                .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {}", e)))?;
        }
        let content = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to finish CSV: {}", e)))?;

        let date = today.format("%Y-%m-%d");
        tracing::info!("Exported {} reports to CSV", view.rows.len());

        Ok(ExportFile {
            filename: format!("업무보고_{}.csv", date),
            ascii_filename: format!("reports_{}.csv", date),
            content,
            rows: view.rows.len(),
        })
    }

    /// Delete rows by derived id and write back the remaining table.
    ///
    /// Ids are checked against a fresh read; if any is gone (the row changed
    /// or was deleted since it was listed) nothing is written.
    pub async fn delete(&self, ids: &[String]) -> Result<usize> {
        self.ensure_tools("Delete")?;

        let selected: HashSet<&str> = ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .collect();
        if selected.is_empty() {
            return Err(AppError::Validation("삭제할 항목을 선택하세요.".to_string()));
        }

        let reports = self.reports.list_fresh().await?;
        let row_ids = derive_ids(self.schema(), &reports);

        let known: HashSet<&str> = row_ids.iter().map(String::as_str).collect();
        let mut missing: Vec<&str> = selected.difference(&known).copied().collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(AppError::Conflict(format!(
                "Reports changed since they were listed: {}",
                missing.join(", ")
            )));
        }

        let before = reports.len();
        let remaining: Vec<Report> = reports
            .into_iter()
            .zip(row_ids.iter())
            .filter(|(_, id)| !selected.contains(id.as_str()))
            .map(|(report, _)| report)
            .collect();
        let deleted = before - remaining.len();

        self.reports.replace_all(&remaining).await?;
        tracing::info!("Deleted {} reports, {} remain", deleted, remaining.len());

        Ok(deleted)
    }
}

/// Pure view construction: ids, filtering and cell layout.
fn build_view(
    schema: &ReportSchema,
    reports: &[Report],
    filter: DashboardFilter,
) -> DashboardViewDto {
    let ids = derive_ids(schema, reports);
    let rows: Vec<DashboardRowDto> = reports
        .iter()
        .zip(ids)
        .filter(|(report, _)| filter.matches(schema, report))
        .map(|(report, id)| DashboardRowDto {
            id,
            cells: schema.cells(report),
            report: report.clone(),
        })
        .collect();

    DashboardViewDto {
        layout: schema.layout,
        columns: schema.headers(),
        total_rows: reports.len(),
        visible_rows: rows.len(),
        empty: reports.is_empty(),
        message: reports.is_empty().then(|| MSG_NO_DATA.to_string()),
        rows,
        filter,
    }
}
