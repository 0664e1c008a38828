use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use utoipa::ToSchema;

/// Sheet header names
pub mod columns {
    pub const WRITTEN_AT: &str = "작성일";
    pub const DATE: &str = "날짜";
    pub const BRANCH: &str = "센터명";
    pub const CATEGORY: &str = "카테고리";
    pub const PRIORITY: &str = "중요도";
    pub const CONTENT: &str = "내용";
    pub const STATUS: &str = "진행상태";
    pub const FEEDBACK: &str = "본사피드백";
    pub const REGISTERED_AT: &str = "등록시간";
}

pub const DEFAULT_BRANCHES: &[&str] = &["1센터", "2센터", "3센터", "4센터", "본부장"];

/// Worksheet layout the service is bound to.
///
/// `Field` is the original field report sheet with priority and a back-office
/// feedback column. `Daily` is the daily log sheet keyed by a client-chosen
/// date, with search, CSV export and deletion on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportLayout {
    Field,
    Daily,
}

impl FromStr for ReportLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "field" => Ok(Self::Field),
            "daily" => Ok(Self::Daily),
            other => Err(format!(
                "REPORT_LAYOUT must be 'field' or 'daily', got '{}'",
                other
            )),
        }
    }
}

impl ReportLayout {
    /// Column headers in sheet order
    pub fn headers(&self) -> &'static [&'static str] {
        use columns::*;
        match self {
            Self::Field => &[
                WRITTEN_AT, BRANCH, CATEGORY, PRIORITY, CONTENT, STATUS, FEEDBACK,
            ],
            Self::Daily => &[DATE, BRANCH, CATEGORY, STATUS, CONTENT, REGISTERED_AT],
        }
    }

    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Field => &[
                "현장영업",
                "팀내이슈",
                "아이디어",
                "전달사항",
                "개인/보안(비공개)",
            ],
            Self::Daily => &[
                "일반방문",
                "현장영업",
                "팀내이슈",
                "전달사항",
                "개인/보안(비공개)",
            ],
        }
    }

    pub fn statuses(&self) -> &'static [&'static str] {
        match self {
            Self::Field => &["진행중", "완료"],
            Self::Daily => &["완료", "진행중", "이슈"],
        }
    }

    /// Priority choices; empty when the layout has no priority column
    pub fn priorities(&self) -> &'static [&'static str] {
        match self {
            Self::Field => &["보통", "긴급 🔥"],
            Self::Daily => &[],
        }
    }

    pub fn has_priority(&self) -> bool {
        !self.priorities().is_empty()
    }

    /// Search, CSV export and row deletion on the dashboard
    pub fn supports_dashboard_tools(&self) -> bool {
        matches!(self, Self::Daily)
    }

    /// Whether the submitter picks the report date
    pub fn accepts_client_date(&self) -> bool {
        matches!(self, Self::Daily)
    }

    pub fn default_cache_ttl(&self) -> Duration {
        match self {
            Self::Field => Duration::from_secs(5),
            Self::Daily => Duration::ZERO,
        }
    }
}
