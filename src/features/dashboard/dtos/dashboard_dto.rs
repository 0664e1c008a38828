use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::models::{Report, ReportLayout};
use crate::shared::constants::DEFAULT_STATUS_FILTER;

// ============================================================================
// Filters
// ============================================================================

/// Dashboard filter query parameters.
///
/// `status` and `branch` may be repeated. A missing `status` means the default
/// (진행중 only); a `status` made only of blank values means every status.
/// A missing or blank `branch` means every branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Include 개인/보안(비공개) rows
    #[serde(default)]
    pub show_confidential: bool,

    /// Allowed statuses
    #[serde(default, deserialize_with = "present_values")]
    pub status: Option<Vec<String>>,

    /// Allowed branches
    #[serde(default, deserialize_with = "present_values")]
    pub branch: Option<Vec<String>>,

    /// Case-insensitive text search over every cell (`daily` layout)
    #[serde(default)]
    pub q: Option<String>,
}

/// A repeatable query key that was sent at all, even as a lone blank `key=`.
///
/// The plain `Option` impl of the query parser reads a single empty value as
/// absent, which would turn "every status" back into the default.
pub fn present_values<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer).map(Some)
}

/// Resolved dashboard filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardFilter {
    pub show_confidential: bool,
    /// Empty means no status filtering
    pub statuses: Vec<String>,
    /// Empty means every branch
    pub branches: Vec<String>,
    pub search: Option<String>,
}

impl Default for DashboardFilter {
    fn default() -> Self {
        Self {
            show_confidential: false,
            statuses: vec![DEFAULT_STATUS_FILTER.to_string()],
            branches: Vec::new(),
            search: None,
        }
    }
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

impl From<DashboardQuery> for DashboardFilter {
    fn from(query: DashboardQuery) -> Self {
        Self {
            show_confidential: query.show_confidential,
            statuses: query
                .status
                .map(non_blank)
                .unwrap_or_else(|| vec![DEFAULT_STATUS_FILTER.to_string()]),
            branches: query.branch.map(non_blank).unwrap_or_default(),
            search: query
                .q
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
        }
    }
}

// ============================================================================
// View
// ============================================================================

/// One visible dashboard row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardRowDto {
    /// Derived selection key, never persisted
    pub id: String,
    /// Cells in `columns` order
    pub cells: Vec<String>,
    pub report: Report,
}

/// Dashboard state after loading and filtering the table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardViewDto {
    pub layout: ReportLayout,
    pub columns: Vec<String>,
    pub rows: Vec<DashboardRowDto>,
    /// Rows in the worksheet before filtering
    pub total_rows: usize,
    pub visible_rows: usize,
    /// True when the worksheet has no reports at all
    pub empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub filter: DashboardFilter,
}

// ============================================================================
// Deletion
// ============================================================================

/// Request DTO for deleting rows by derived id
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteReportsDto {
    pub ids: Vec<String>,
}

/// Response DTO after deleting rows
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteReportsResponseDto {
    pub deleted: usize,
    pub dashboard: DashboardViewDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_status_means_default() {
        let filter = DashboardFilter::from(DashboardQuery::default());
        assert_eq!(filter, DashboardFilter::default());
        assert_eq!(filter.statuses, vec!["진행중"]);
    }

    #[test]
    fn test_blank_status_means_all() {
        let filter = DashboardFilter::from(DashboardQuery {
            status: Some(vec![String::new()]),
            ..Default::default()
        });
        assert!(filter.statuses.is_empty());
    }

    #[test]
    fn test_lone_blank_status_in_query_string_means_all() {
        let query: DashboardQuery = serde_html_form::from_str("status=").unwrap();
        assert_eq!(query.status, Some(vec![String::new()]));
        assert!(DashboardFilter::from(query).statuses.is_empty());

        let query: DashboardQuery = serde_html_form::from_str("show_confidential=true").unwrap();
        assert_eq!(query.status, None);
        assert_eq!(DashboardFilter::from(query).statuses, vec!["진행중"]);

        let query: DashboardQuery =
            serde_html_form::from_str("status=&status=%EC%99%84%EB%A3%8C").unwrap();
        assert_eq!(DashboardFilter::from(query).statuses, vec!["완료"]);
    }

    #[test]
    fn test_blank_values_and_search_are_dropped() {
        let filter = DashboardFilter::from(DashboardQuery {
            show_confidential: true,
            status: Some(vec!["".into(), "완료".into()]),
            branch: Some(vec![" 1센터 ".into(), "".into()]),
            q: Some("   ".into()),
        });
        assert!(filter.show_confidential);
        assert_eq!(filter.statuses, vec!["완료"]);
        assert_eq!(filter.branches, vec!["1센터"]);
        assert_eq!(filter.search, None);
    }
}
