use crate::features::dashboard::dtos::DashboardFilter;
use crate::features::reports::models::{Report, ReportSchema};
use crate::shared::constants::CONFIDENTIAL_CATEGORY;

impl DashboardFilter {
    /// Whether `report` stays visible.
    ///
    /// Applied in order: confidential visibility, status membership, branch
    /// membership, then the free-text search over every persisted cell.
    pub fn matches(&self, schema: &ReportSchema, report: &Report) -> bool {
        if !self.show_confidential && report.category == CONFIDENTIAL_CATEGORY {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&report.status) {
            return false;
        }
        if !self.branches.is_empty() && !self.branches.contains(&report.branch) {
            return false;
        }
        match &self.search {
            Some(needle) => {
                let needle = needle.to_lowercase();
                schema
                    .cells(report)
                    .iter()
                    .any(|cell| cell.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportLayout;
    use crate::shared::test_helpers::daily_report;

    fn schema() -> ReportSchema {
        ReportSchema::new(ReportLayout::Daily, None)
    }

    fn visible<'a>(filter: &DashboardFilter, reports: &'a [Report]) -> Vec<&'a str> {
        let schema = schema();
        reports
            .iter()
            .filter(|r| filter.matches(&schema, r))
            .map(|r| r.content.as_str())
            .collect()
    }

    fn scenario() -> Vec<Report> {
        vec![
            daily_report("2026-10-19", "1센터", "일반방문", "진행중", "A"),
            daily_report("2026-10-18", "2센터", CONFIDENTIAL_CATEGORY, "완료", "B"),
        ]
    }

    #[test]
    fn test_confidential_toggle_does_not_bypass_status_filter() {
        let reports = scenario();
        let mut filter = DashboardFilter::default();

        assert_eq!(visible(&filter, &reports), vec!["A"]);

        filter.show_confidential = true;
        assert_eq!(visible(&filter, &reports), vec!["A"]);
    }

    #[test]
    fn test_confidential_rows_only_with_toggle() {
        let reports = scenario();
        let mut filter = DashboardFilter {
            statuses: Vec::new(),
            ..Default::default()
        };

        assert_eq!(visible(&filter, &reports), vec!["A"]);

        filter.show_confidential = true;
        assert_eq!(visible(&filter, &reports), vec!["A", "B"]);
    }

    #[test]
    fn test_branch_filter() {
        let reports = vec![
            daily_report("2026-10-19", "1센터", "일반방문", "진행중", "one"),
            daily_report("2026-10-19", "2센터", "일반방문", "진행중", "two"),
            daily_report("2026-10-19", "3센터", "일반방문", "진행중", "three"),
        ];
        let filter = DashboardFilter {
            branches: vec!["1센터".into(), "3센터".into()],
            ..Default::default()
        };
        assert_eq!(visible(&filter, &reports), vec!["one", "three"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_cells() {
        let reports = vec![
            daily_report("2026-10-19", "1센터", "일반방문", "진행중", "Tire rotation"),
            daily_report("2026-10-19", "2센터", "현장영업", "진행중", "브레이크 점검"),
        ];
        let mut filter = DashboardFilter {
            search: Some("TIRE".into()),
            ..Default::default()
        };
        assert_eq!(visible(&filter, &reports), vec!["Tire rotation"]);

        // Matches a non-content cell too.
        filter.search = Some("현장".into());
        assert_eq!(visible(&filter, &reports), vec!["브레이크 점검"]);

        filter.search = Some("없는 단어".into());
        assert!(visible(&filter, &reports).is_empty());
    }

    #[test]
    fn test_filter_is_deterministic() {
        let reports = scenario();
        let filter = DashboardFilter {
            show_confidential: true,
            statuses: vec!["진행중".into(), "완료".into()],
            branches: Vec::new(),
            search: Some("a".into()),
        };
        assert_eq!(visible(&filter, &reports), visible(&filter, &reports));
    }
}
