use serde::{Deserialize, Serialize};

use crate::features::dashboard::dtos::{
    present_values, DashboardFilter, DashboardQuery, DashboardViewDto,
};
use crate::features::reports::dtos::{CreateReportDto, ReportOptionsDto};

/// Which of the two tabs is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Form,
    Dashboard,
}

/// Query string of `GET /`: the open tab, a flash code and the dashboard filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub tab: Tab,
    #[serde(default)]
    pub notice: Option<String>,
    #[serde(default)]
    pub show_confidential: bool,
    #[serde(default, deserialize_with = "present_values")]
    pub status: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present_values")]
    pub branch: Option<Vec<String>>,
    #[serde(default)]
    pub q: Option<String>,
}

impl PageQuery {
    pub fn dashboard_query(&self) -> DashboardQuery {
        DashboardQuery {
            show_confidential: self.show_confidential,
            status: self.status.clone(),
            branch: self.branch.clone(),
            q: self.q.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// Submission form as posted by the browser.
///
/// Optional fields arrive as empty strings when left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportForm {
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<ReportForm> for CreateReportDto {
    fn from(form: ReportForm) -> Self {
        Self {
            branch: form.branch,
            category: form.category,
            priority: present(form.priority),
            status: form.status,
            content: form.content,
            date: present(form.date),
        }
    }
}

/// Delete form: one `ids` entry per checked row, plus the filters in effect
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub show_confidential: bool,
    #[serde(default, deserialize_with = "present_values")]
    pub status: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present_values")]
    pub branch: Option<Vec<String>>,
    #[serde(default)]
    pub q: Option<String>,
}

impl DeleteForm {
    pub fn dashboard_query(&self) -> DashboardQuery {
        DashboardQuery {
            show_confidential: self.show_confidential,
            status: self.status.clone(),
            branch: self.branch.clone(),
            q: self.q.clone(),
        }
    }
}

/// One-shot messages shown above the tabs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub notice: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// Everything the page template renders
#[derive(Debug, Serialize)]
pub struct PageContext {
    pub title: String,
    pub authenticated: bool,
    pub tab: Tab,
    pub flash: Flash,
    pub options: Option<ReportOptionsDto>,
    pub draft: Option<ReportForm>,
    pub dashboard: Option<DashboardViewDto>,
    pub filter: DashboardFilter,
    pub export_href: Option<String>,
    pub today: String,
}
