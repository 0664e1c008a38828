use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

use super::layout::{columns, ReportLayout, DEFAULT_BRANCHES};
use crate::modules::sheets::Table;

/// One submitted report, as stored in a worksheet row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Report {
    /// 작성일 (`field`) or 날짜 (`daily`)
    pub timestamp: String,
    pub branch: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub status: String,
    pub content: String,
    /// Back-office feedback, edited directly in the sheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Server-side registration time (`daily` only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
}

impl Report {
    /// Newest first: by timestamp, then registration time.
    fn newest_first(a: &Report, b: &Report) -> Ordering {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.registered_at.cmp(&a.registered_at))
    }
}

/// Maps typed reports to and from the configured worksheet layout
#[derive(Debug, Clone)]
pub struct ReportSchema {
    pub layout: ReportLayout,
    pub branches: Vec<String>,
}

impl ReportSchema {
    pub fn new(layout: ReportLayout, branches: Option<Vec<String>>) -> Self {
        let branches = branches
            .unwrap_or_else(|| DEFAULT_BRANCHES.iter().map(|b| b.to_string()).collect());
        Self { layout, branches }
    }

    pub fn headers(&self) -> Vec<String> {
        self.layout.headers().iter().map(|h| h.to_string()).collect()
    }

    /// An empty table carrying only this layout's header row
    pub fn empty_table(&self) -> Table {
        Table::new(self.headers(), Vec::new())
    }

    /// Cells of `report` in sheet column order
    pub fn cells(&self, report: &Report) -> Vec<String> {
        self.layout
            .headers()
            .iter()
            .map(|header| match *header {
                columns::WRITTEN_AT | columns::DATE => report.timestamp.clone(),
                columns::BRANCH => report.branch.clone(),
                columns::CATEGORY => report.category.clone(),
                columns::PRIORITY => report.priority.clone().unwrap_or_default(),
                columns::CONTENT => report.content.clone(),
                columns::STATUS => report.status.clone(),
                columns::FEEDBACK => report.feedback.clone().unwrap_or_default(),
                columns::REGISTERED_AT => report.registered_at.clone().unwrap_or_default(),
                _ => String::new(),
            })
            .collect()
    }

    /// Decode every non-blank row, newest first.
    ///
    /// Cells are looked up by header name, so column order in the sheet does
    /// not matter. Missing columns decode as empty strings.
    pub fn decode(&self, table: &Table) -> Vec<Report> {
        let timestamp_col = match self.layout {
            ReportLayout::Field => columns::WRITTEN_AT,
            ReportLayout::Daily => columns::DATE,
        };
        let index = |header: &str| table.column(header);
        let timestamp = index(timestamp_col);
        let branch = index(columns::BRANCH);
        let category = index(columns::CATEGORY);
        let priority = index(columns::PRIORITY);
        let content = index(columns::CONTENT);
        let status = index(columns::STATUS);
        let feedback = index(columns::FEEDBACK);
        let registered_at = index(columns::REGISTERED_AT);

        let mut reports: Vec<Report> = table
            .rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|row| {
                let cell = |col: Option<usize>| {
                    col.and_then(|i| row.get(i)).cloned().unwrap_or_default()
                };
                Report {
                    timestamp: cell(timestamp),
                    branch: cell(branch),
                    category: cell(category),
                    priority: self.layout.has_priority().then(|| cell(priority)),
                    status: cell(status),
                    content: cell(content),
                    feedback: matches!(self.layout, ReportLayout::Field)
                        .then(|| cell(feedback)),
                    registered_at: matches!(self.layout, ReportLayout::Daily)
                        .then(|| cell(registered_at)),
                }
            })
            .collect();

        // Store order is not guaranteed; sort_by is stable for equal keys.
        reports.sort_by(Report::newest_first);
        reports
    }

    /// Encode reports into a full table with this layout's header row
    pub fn encode(&self, reports: &[Report]) -> Table {
        Table::new(
            self.headers(),
            reports.iter().map(|r| self.cells(r)).collect(),
        )
    }
}
