use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::CreateReportDto;
use crate::features::reports::models::{Report, ReportLayout, ReportSchema};
use crate::modules::sheets::ReportStore;
use crate::shared::validation::error_messages;

/// Service for reading and appending reports.
///
/// Every mutation is read-modify-write of the whole worksheet. There is no
/// concurrency control, so two submissions racing on the same table can lose
/// one of the rows (last write wins).
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    schema: Arc<ReportSchema>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>, schema: Arc<ReportSchema>) -> Self {
        Self { store, schema }
    }

    pub fn schema(&self) -> &ReportSchema {
        &self.schema
    }

    /// Load every report, newest first
    pub async fn list(&self) -> Result<Vec<Report>> {
        let table = self.store.list().await.map_err(|e| {
            tracing::error!("Failed to read report table: {}", e);
            AppError::Store(e)
        })?;
        Ok(self.schema.decode(&table))
    }

    /// Like `list`, but never served from a cache; mutations start from this
    pub async fn list_fresh(&self) -> Result<Vec<Report>> {
        let table = self.store.list_fresh().await.map_err(|e| {
            tracing::error!("Failed to read report table: {}", e);
            AppError::Store(e)
        })?;
        Ok(self.schema.decode(&table))
    }

    /// Overwrite the worksheet with exactly `reports`
    pub async fn replace_all(&self, reports: &[Report]) -> Result<()> {
        self.store
            .replace_all(self.schema.encode(reports))
            .await
            .map_err(|e| {
                tracing::error!("Failed to write report table: {}", e);
                AppError::Store(e)
            })
    }

    /// Validate and append a new report stamped with the current local time
    pub async fn submit(&self, dto: CreateReportDto) -> Result<Report> {
        self.submit_at(dto, Local::now().naive_local()).await
    }

    pub async fn submit_at(&self, dto: CreateReportDto, now: NaiveDateTime) -> Result<Report> {
        let report = self.build_report(dto, now)?;

        // Re-read right before writing so the append sees the latest table.
        let mut reports = self.list_fresh().await?;
        reports.push(report.clone());
        self.replace_all(&reports).await?;

        tracing::info!(
            "Report submitted: branch={}, category={}, status={}, rows={}",
            report.branch,
            report.category,
            report.status,
            reports.len()
        );

        Ok(report)
    }

    /// Turn a submission into a row, rejecting anything the form could not produce
    pub fn build_report(&self, dto: CreateReportDto, now: NaiveDateTime) -> Result<Report> {
        dto.validate()
            .map_err(|e| AppError::Validation(error_messages(&e).join(" ")))?;

        let layout = self.schema.layout;

        if !self.schema.branches.iter().any(|b| *b == dto.branch) {
            return Err(AppError::Validation(format!(
                "알 수 없는 지점/센터명입니다: {}",
                dto.branch
            )));
        }
        ensure_choice("카테고리", &dto.category, layout.categories())?;
        ensure_choice("진행 상태", &dto.status, layout.statuses())?;

        let priority = match (layout.has_priority(), dto.priority) {
            (true, Some(priority)) => {
                ensure_choice("중요도", &priority, layout.priorities())?;
                Some(priority)
            }
            (true, None) => layout.priorities().first().map(|p| p.to_string()),
            (false, Some(_)) => {
                return Err(AppError::Validation(
                    "이 보고 양식에는 중요도 항목이 없습니다.".to_string(),
                ))
            }
            (false, None) => None,
        };

        if dto.date.is_some() && !layout.accepts_client_date() {
            return Err(AppError::Validation(
                "이 보고 양식에서는 날짜를 지정할 수 없습니다.".to_string(),
            ));
        }

        let report = match layout {
            ReportLayout::Field => Report {
                timestamp: now.format("%Y-%m-%d %H:%M").to_string(),
                branch: dto.branch,
                category: dto.category,
                priority,
                status: dto.status,
                content: dto.content,
                feedback: Some(String::new()),
                registered_at: None,
            },
            ReportLayout::Daily => Report {
                timestamp: dto
                    .date
                    .unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
                branch: dto.branch,
                category: dto.category,
                priority,
                status: dto.status,
                content: dto.content,
                feedback: None,
                registered_at: Some(now.format("%Y-%m-%d %H:%M:%S").to_string()),
            },
        };

        Ok(report)
    }
}

fn ensure_choice(label: &str, value: &str, choices: &[&str]) -> Result<()> {
    if choices.contains(&value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{} 값이 올바르지 않습니다: {}",
            label, value
        )))
    }
}
