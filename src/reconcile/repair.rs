//! OCR string repair and per-candidate date parsing.
//!
//! The "from" field of a scanned disclosure arrives as an arbitrary OCR
//! fragment: `"2014~03~15"`, `"2o13-o5-1o"`, `"y904.06.12"`, or garbage.
//! This module turns one such fragment into a [`ParsedCandidate`]:
//!
//! - split on the `YYYY sep MM sep DD` pattern (separators `~ - . :`)
//! - undo the common digit confusions per column (`o→0`, `r`/`t`→`1`, `z→2`)
//! - apply year-specific repairs and the corpus year-token fix table
//! - prefer a contiguous 8-digit run from the raw string when one exists
//! - validate year against `[1950, min_year]` and month against `[1, 12]`
//!
//! Repairs run on the raw (lowercase) OCR text, not on normalized text; the
//! confusions being fixed are lowercase letter shapes.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::Role;

lazy_static! {
    /// `YYYY sep MM sep DD` with word characters, so corrupted digits still split.
    static ref DATE_PARTS: Regex =
        Regex::new(r"(\w{4})[~\-.:](\w{2})[~\-.:](\w{2})").unwrap();

    /// Separator-collapsing passes toward a contiguous 8-digit run.
    static ref SEP_4_2_2: Regex =
        Regex::new(r"(\d{4})[~\-.:\s](\d{2})[~\-.:\s](\d{2})").unwrap();
    static ref SEP_4_4: Regex = Regex::new(r"(\d{4})[\-.:\s](\d{4})").unwrap();
    static ref SEP_6_2: Regex = Regex::new(r"(\d{6})[\-.:\s](\d{2})").unwrap();
    static ref DIGIT_RUN_8: Regex = Regex::new(r"\d{8}").unwrap();
}

/// Corpus-specific literal fixes for year tokens that the character-level
/// substitutions cannot recover.
const YEAR_TOKEN_FIXES: &[(&str, &str)] = &[
    ("201e", "2018"),
    ("20v4", "2014"),
    ("n913", "2013"),
    ("y000", "1990"),
    ("y904", "1994"),
    ("y00e", "1998"),
    ("y080", "1989"),
];

/// Hard lower bound for a plausible start year.
const MIN_PLAUSIBLE_YEAR: u16 = 1950;

/// Injectable repair tables.
///
/// The year-token fixes are corpus-level and ship as defaults; the
/// per-(person, role) year overrides are tied to exact identifiers in a given
/// corpus and are therefore supplied by the caller, empty by default.
#[derive(Debug, Clone, Default)]
pub struct RepairTable {
    person_years: HashMap<(String, Role), String>,
}

impl RepairTable {
    pub fn with_person_overrides(
        overrides: impl IntoIterator<Item = (String, Role, String)>,
    ) -> Self {
        Self {
            person_years: overrides
                .into_iter()
                .map(|(person_id, role, year)| ((person_id, role), year))
                .collect(),
        }
    }

    pub fn person_year(&self, person_id: &str, role: Role) -> Option<&str> {
        self.person_years
            .get(&(person_id.to_string(), role))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.person_years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.person_years.is_empty()
    }
}

/// One candidate's best-effort reading.
///
/// `year`/`month` are kept independently of `fecha_str`: a candidate whose
/// year failed validation can still contribute its month to the group-level
/// fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCandidate {
    /// Canonical `YYYYMM` string; present only when both parts validated.
    pub fecha_str: Option<String>,
    pub year: Option<u16>,
    pub month: Option<u8>,
}

impl ParsedCandidate {
    pub fn empty() -> Self {
        Self {
            fecha_str: None,
            year: None,
            month: None,
        }
    }
}

/// Parse one raw "from" fragment.
///
/// `min_year` is the group's minimum observed scrape year; any candidate year
/// beyond it is future-dated relative to the earliest known appearance and is
/// discarded. `year_override`, when present, replaces the year component
/// outright (irrecoverable per-person OCR artifacts).
pub fn parse_candidate(
    raw: &str,
    min_year: Option<u16>,
    year_override: Option<&str>,
) -> ParsedCandidate {
    // Column-wise reading from the separator pattern.
    let parts = DATE_PARTS.captures(raw).map(|c| {
        (
            repair_year_token(&repair_digit_run(&c[1])),
            repair_digit_run(&c[2]),
            repair_digit_run(&c[3]),
        )
    });

    // A clean contiguous 8-digit run in the raw string wins over the
    // column-wise reassembly.
    let reading = extract_digit_run(raw)
        .or_else(|| parts.map(|(y, m, d)| format!("{y}{m}{d}")))
        .map(|s| repair_reading_prefix(&s));

    let Some(reading) = reading else {
        return ParsedCandidate::empty();
    };

    // Keep year + month only; the day column is too corrupted to be useful.
    let year_month: String = reading.chars().take(6).collect();
    if year_month.chars().count() < 6 {
        return ParsedCandidate::empty();
    }
    let year_str = match year_override {
        Some(y) => y.to_string(),
        None => year_month.chars().take(4).collect(),
    };
    let month_str: String = year_month.chars().skip(4).take(2).collect();

    let year = year_str
        .parse::<u16>()
        .ok()
        .filter(|y| *y >= MIN_PLAUSIBLE_YEAR && min_year.is_none_or(|m| *y <= m));
    let month = month_str.parse::<u8>().ok().filter(|m| (1..=12).contains(m));

    let fecha_str = match (year, month) {
        (Some(_), Some(_)) => Some(format!("{year_str}{month_str}")),
        _ => None,
    };

    ParsedCandidate {
        fecha_str,
        year,
        month,
    }
}

/// Undo single-character digit confusions inside a date column.
fn repair_digit_run(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'o' => '0',
            'r' | 't' => '1',
            'z' => '2',
            other => other,
        })
        .collect()
}

/// Year-only repairs: leading-character confusions, then the literal
/// year-token fix table.
fn repair_year_token(s: &str) -> String {
    let mut out = s.to_string();
    if let Some(rest) = out.strip_prefix('a') {
        out = format!("2{rest}");
    }
    if let Some(rest) = out.strip_prefix("y99") {
        out = format!("199{rest}");
    }
    for (bad, good) in YEAR_TOKEN_FIXES {
        if out == *bad {
            out = (*good).to_string();
        }
    }
    out
}

/// Century confusions on the assembled 8-character reading.
fn repair_reading_prefix(s: &str) -> String {
    if let Some(rest) = s.strip_prefix("79") {
        return format!("19{rest}");
    }
    if let Some(rest) = s.strip_prefix("30") {
        return format!("20{rest}");
    }
    s.to_string()
}

/// Collapse separators and pull out a contiguous 8-digit run, if any.
fn extract_digit_run(raw: &str) -> Option<String> {
    let pass1 = SEP_4_2_2.replace_all(raw, "$1$2$3");
    let pass2 = SEP_4_4.replace_all(&pass1, "$1$2");
    let pass3 = SEP_6_2.replace_all(&pass2, "$1$2");
    DIGIT_RUN_8.find(&pass3).map(|m| m.as_str().to_string())
}
