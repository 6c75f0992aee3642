//! Run tallies and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the classifier/reconciler stay clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{ClassifiedEntry, Resolution, Role, StartDateRecord};
use crate::io::ingest::IngestedRecords;

/// Per-role record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleTally {
    pub judge: usize,
    pub prosecutor: usize,
    pub other: usize,
    pub unknown: usize,
}

impl RoleTally {
    pub fn count(classified: &[ClassifiedEntry]) -> Self {
        let mut t = Self::default();
        for c in classified {
            match c.role {
                Role::Judge => t.judge += 1,
                Role::Prosecutor => t.prosecutor += 1,
                Role::Other => t.other += 1,
                Role::Unknown => t.unknown += 1,
            }
        }
        t
    }
}

/// How many groups each fallback level resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionTally {
    pub exact_mode: usize,
    pub min_year_month: usize,
    pub min_year_mode: usize,
    pub any_mode: usize,
    pub part_mode: usize,
    pub unresolved: usize,
}

impl ResolutionTally {
    pub fn count(records: &[StartDateRecord]) -> Self {
        let mut t = Self::default();
        for r in records {
            match r.resolution {
                Resolution::ExactMode => t.exact_mode += 1,
                Resolution::MinYearMonth => t.min_year_month += 1,
                Resolution::MinYearMode => t.min_year_mode += 1,
                Resolution::AnyMode => t.any_mode += 1,
                Resolution::PartMode => t.part_mode += 1,
                Resolution::Unresolved => t.unresolved += 1,
            }
        }
        t
    }

    pub fn dated(&self) -> usize {
        self.exact_mode + self.min_year_month + self.min_year_mode + self.any_mode + self.part_mode
    }
}

/// Format the classification half of the run summary.
pub fn format_classification_summary(
    ingest: &IngestedRecords,
    classified: &[ClassifiedEntry],
) -> String {
    let tally = RoleTally::count(classified);
    let mut out = String::new();

    out.push_str("=== escalafon - disclosure title classification ===\n");
    out.push_str(&format!(
        "Rows: read={} | used={} | row errors={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len(),
    ));
    out.push_str(&format!(
        "Persons: {}\n",
        crate::group::roster(classified.iter().map(|c| &c.entry)).len(),
    ));
    out.push_str(&format!(
        "Roles: judge={} | prosecutor={} | other={} | unknown={}\n",
        tally.judge, tally.prosecutor, tally.other, tally.unknown,
    ));

    if !ingest.row_errors.is_empty() {
        out.push_str("\nRow errors:\n");
        for err in &ingest.row_errors {
            let who = err.person_id.as_deref().unwrap_or("?");
            out.push_str(&format!("  line {} ({}): {}\n", err.line, who, err.message));
        }
    }

    out
}

/// Format the reconciliation half of the run summary.
pub fn format_reconciliation_summary(
    n_groups: usize,
    records: &[StartDateRecord],
) -> String {
    let tally = ResolutionTally::count(records);
    let mut out = String::new();

    out.push_str(&format!(
        "\nGroups: {} | dated={} | unresolved={}\n",
        n_groups,
        tally.dated(),
        tally.unresolved,
    ));
    out.push_str("Resolution levels:\n");
    for (name, n) in [
        (Resolution::ExactMode.display_name(), tally.exact_mode),
        (Resolution::MinYearMonth.display_name(), tally.min_year_month),
        (Resolution::MinYearMode.display_name(), tally.min_year_mode),
        (Resolution::AnyMode.display_name(), tally.any_mode),
        (Resolution::PartMode.display_name(), tally.part_mode),
        (Resolution::Unresolved.display_name(), tally.unresolved),
    ] {
        out.push_str(&format!("  {name:<18} {n}\n"));
    }
    out.push_str(&format!(
        "\nGenerated: {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisclosureEntry;

    fn classified(role: Role) -> ClassifiedEntry {
        ClassifiedEntry {
            entry: DisclosureEntry {
                person_id: "1".to_string(),
                full_name: None,
                job_title: String::new(),
                institution: String::new(),
                document_id: "d".to_string(),
                year: String::new(),
                from_field: String::new(),
            },
            role,
            confidence: None,
        }
    }

    #[test]
    fn role_tally_counts_each_category() {
        let input = vec![
            classified(Role::Judge),
            classified(Role::Judge),
            classified(Role::Prosecutor),
            classified(Role::Unknown),
        ];
        let t = RoleTally::count(&input);
        assert_eq!(t.judge, 2);
        assert_eq!(t.prosecutor, 1);
        assert_eq!(t.other, 0);
        assert_eq!(t.unknown, 1);
    }

    #[test]
    fn resolution_tally_splits_dated_and_unresolved() {
        let records = vec![
            StartDateRecord {
                person_id: "1".to_string(),
                role: Role::Judge,
                start_date: Some("201301".to_string()),
                resolution: Resolution::ExactMode,
            },
            StartDateRecord {
                person_id: "2".to_string(),
                role: Role::Judge,
                start_date: None,
                resolution: Resolution::Unresolved,
            },
        ];
        let t = ResolutionTally::count(&records);
        assert_eq!(t.dated(), 1);
        assert_eq!(t.unresolved, 1);
    }
}
