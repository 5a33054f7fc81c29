use crate::types::{Evaluation, ReportRow, TOTAL_LABEL};

/// Predicate over a finished report. All criteria are optional and combine
/// with AND; the grand-total row always passes so the filtered view keeps
/// its footer.
#[derive(Debug, Default, Clone)]
pub struct ReportFilter {
    pub role: Option<String>,
    pub evaluation: Option<Evaluation>,
    pub name_search: Option<String>,
}

impl ReportFilter {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.evaluation.is_none() && self.name_search.is_none()
    }

    pub fn matches(&self, row: &ReportRow) -> bool {
        if row.name == TOTAL_LABEL {
            return true;
        }
        if let Some(role) = &self.role {
            if &row.role != role {
                return false;
            }
        }
        if let Some(evaluation) = self.evaluation {
            if row.evaluation != evaluation {
                return false;
            }
        }
        if let Some(needle) = &self.name_search {
            if !row
                .name
                .to_lowercase()
                .contains(needle.to_lowercase().as_str())
            {
                return false;
            }
        }
        true
    }

    /// Borrowed view of the report in original order. Rows are never copied
    /// or altered.
    pub fn apply<'a>(&self, rows: &'a [ReportRow]) -> Vec<&'a ReportRow> {
        rows.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::build_report;
    use crate::types::DeliveryRecord;

    fn sample_report() -> Vec<ReportRow> {
        let rec = |name: &str, role: &str, issued, signed| DeliveryRecord {
            name: name.to_string(),
            role: role.to_string(),
            orders_issued: issued,
            orders_signed: signed,
        };
        build_report(&[
            rec("An", "Admin", 10, 9),
            rec("Bình", "Shipper-chính thức", 10, 2),
            rec("Cường", "Shipper-chính thức", 10, 8),
        ])
        .unwrap()
    }

    #[test]
    fn empty_filter_passes_everything() {
        let rows = sample_report();
        let filter = ReportFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&rows).len(), rows.len());
    }

    #[test]
    fn total_row_always_survives() {
        let rows = sample_report();
        let filter = ReportFilter {
            name_search: Some("no such employee".to_string()),
            ..Default::default()
        };
        let view = filter.apply(&rows);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, TOTAL_LABEL);
    }

    #[test]
    fn filters_by_role() {
        let rows = sample_report();
        let filter = ReportFilter {
            role: Some("Shipper-chính thức".to_string()),
            ..Default::default()
        };
        let names: Vec<&str> = filter.apply(&rows).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bình", "Cường", TOTAL_LABEL]);
    }

    #[test]
    fn filters_by_evaluation() {
        let rows = sample_report();
        let filter = ReportFilter {
            evaluation: Some(Evaluation::Dat),
            ..Default::default()
        };
        let names: Vec<&str> = filter.apply(&rows).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["An", "Cường", TOTAL_LABEL]);
    }

    #[test]
    fn name_search_is_case_insensitive() {
        let rows = sample_report();
        let filter = ReportFilter {
            name_search: Some("cườ".to_string()),
            ..Default::default()
        };
        let view = filter.apply(&rows);
        assert_eq!(view[0].name, "Cường");

        let upper = ReportFilter {
            name_search: Some("CƯỜNG".to_string()),
            ..Default::default()
        };
        assert_eq!(upper.apply(&rows).len(), 2);
    }

    #[test]
    fn criteria_combine_with_and() {
        let rows = sample_report();
        let filter = ReportFilter {
            role: Some("Shipper-chính thức".to_string()),
            evaluation: Some(Evaluation::KhongDat),
            ..Default::default()
        };
        let names: Vec<&str> = filter.apply(&rows).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bình", TOTAL_LABEL]);
    }
}
