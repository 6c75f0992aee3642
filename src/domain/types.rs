//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can
//! be:
//!
//! - passed through the classify → group → reconcile pipeline in-memory
//! - exported to CSV/JSON
//! - reloaded later for audits or comparisons

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Canonical occupation category for a disclosure record.
///
/// `Other` covers titles that matched nothing (or matched too weakly to
/// trust); `Unknown` is reserved for records with an empty title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Judge,
    Prosecutor,
    Other,
    Unknown,
}

impl Role {
    /// True for the two categories that flow into date reconciliation.
    pub fn is_official(self) -> bool {
        matches!(self, Role::Judge | Role::Prosecutor)
    }

    /// Human-readable label for terminal output and CSV cells.
    pub fn display_name(self) -> &'static str {
        match self {
            Role::Judge => "judge",
            Role::Prosecutor => "prosecutor",
            Role::Other => "other",
            Role::Unknown => "unknown",
        }
    }

    /// Parse the labels accepted in override tables.
    pub fn parse_label(s: &str) -> Option<Role> {
        match s.trim().to_ascii_lowercase().as_str() {
            "judge" | "juez" => Some(Role::Judge),
            "prosecutor" | "fiscal" => Some(Role::Prosecutor),
            "other" | "otro" => Some(Role::Other),
            "unknown" => Some(Role::Unknown),
            _ => None,
        }
    }
}

/// One person on the deduplicated roster.
///
/// The identity key is `person_id` (a unique citizen identifier); records are
/// created once from the scraped roster and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialRecord {
    pub person_id: String,
    pub full_name: Option<String>,
}

/// One scraped (person, year, document) appearance from the disclosure portal.
///
/// Produced by the upstream scraper/OCR collaborator; consumed read-only here.
/// `document_id` uses two sentinels: `"No data"` (no disclosure exists) and
/// `"0"` (a disclosure exists but carries no retrievable document).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisclosureEntry {
    pub person_id: String,
    pub full_name: Option<String>,
    pub job_title: String,
    pub institution: String,
    pub document_id: String,
    /// Scrape year as reported by the portal; possibly empty.
    pub year: String,
    /// Raw OCR reading of the document's "from" date field; possibly empty.
    pub from_field: String,
}

impl DisclosureEntry {
    /// Parse the scrape year, if the field holds digits.
    pub fn year_value(&self) -> Option<u16> {
        self.year.trim().parse().ok()
    }
}

/// A [`DisclosureEntry`] plus its resolved role and confidence.
///
/// Invariant, maintained by the rule cascade: a final role of judge or
/// prosecutor always carries a confidence (≥ 90; judges ≥ 95), while
/// other/unknown always carry none.
#[derive(Debug, Clone)]
pub struct ClassifiedEntry {
    pub entry: DisclosureEntry,
    pub role: Role,
    /// 0–100 fuzzy/override confidence; absent for other/unknown.
    pub confidence: Option<f64>,
}

/// All date candidates for one (person, role) pair.
#[derive(Debug, Clone)]
pub struct RoleGroup {
    pub person_id: String,
    pub role: Role,
    /// Minimum scrape year observed for this pair; the reconciler treats any
    /// candidate year beyond it as implausible.
    pub min_year: Option<u16>,
    /// Raw "from" strings, one per retained document.
    pub candidates: Vec<String>,
}

/// Which fallback level produced a group's start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// A unique mode of the full `YYYYMM` strings.
    ExactMode,
    /// No candidate had a plausible year; minimum scrape year + month mode.
    MinYearMonth,
    /// Unique mode after restricting to candidates at the minimum year.
    MinYearMode,
    /// Any mode of the (possibly restricted) `YYYYMM` strings.
    AnyMode,
    /// Unique year mode and unique month mode reassembled separately.
    PartMode,
    /// All five levels exhausted; no start date.
    Unresolved,
}

impl Resolution {
    pub fn display_name(self) -> &'static str {
        match self {
            Resolution::ExactMode => "exact mode",
            Resolution::MinYearMonth => "min-year + month",
            Resolution::MinYearMode => "min-year mode",
            Resolution::AnyMode => "any mode",
            Resolution::PartMode => "part mode",
            Resolution::Unresolved => "unresolved",
        }
    }
}

/// Terminal output: one best-guess start date per (person, role).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartDateRecord {
    pub person_id: String,
    pub role: Role,
    /// `YYYYMM`, absent when the group was unresolvable.
    pub start_date: Option<String>,
    pub resolution: Resolution,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: PathBuf,
    /// Optional CSV of per-(person, role) year overrides for irrecoverable
    /// OCR artifacts tied to specific identifiers.
    pub overrides_path: Option<PathBuf>,

    pub export_dates: Option<PathBuf>,
    pub export_classified: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}
