//! Date reconciliation: many noisy OCR readings → one `YYYYMM` per group.
//!
//! Each (person, role) group carries every "from" string OCR'd from that
//! person's documents. After per-candidate repair ([`repair`]), a graduated
//! five-level fallback picks the single most trustworthy date:
//!
//! 1. unique mode of the full `YYYYMM` strings
//! 2. no candidate has a plausible year → minimum scrape year + month mode
//!    (month defaults to `08`, mid-year)
//! 3. unique mode after restricting to candidates at the minimum year
//! 4. any mode of the (possibly restricted) strings, first-encountered wins
//! 5. unique year mode and unique month mode reassembled separately
//!
//! Each level runs only if the previous produced nothing. The ordering
//! reflects a confidence ranking: exact agreement, then year-anchored
//! agreement, then most-common guess, then partial reconstruction. Ground
//! truth is unavailable, so an exhausted group yields an absent date, never
//! an error.

pub mod repair;

use crate::domain::{Resolution, RoleGroup};

pub use repair::{ParsedCandidate, RepairTable, parse_candidate};

/// Default month when a group reaches level 2 or 5 with no month signal.
const MID_YEAR_MONTH: u8 = 8;

/// The reconciler's verdict for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub start_date: Option<String>,
    pub resolution: Resolution,
}

impl Reconciled {
    fn resolved(start_date: String, resolution: Resolution) -> Self {
        Self {
            start_date: Some(start_date),
            resolution,
        }
    }

    fn unresolved() -> Self {
        Self {
            start_date: None,
            resolution: Resolution::Unresolved,
        }
    }
}

/// Reconcile one (person, role) group. Pure; groups never interact.
pub fn reconcile(group: &RoleGroup, table: &RepairTable) -> Reconciled {
    let year_override = table.person_year(&group.person_id, group.role);
    let parsed: Vec<ParsedCandidate> = group
        .candidates
        .iter()
        .map(|raw| parse_candidate(raw, group.min_year, year_override))
        .collect();

    // Level 1: exact agreement.
    if let Some(m) = unique_mode(parsed.iter().filter_map(|c| c.fecha_str.as_deref())) {
        return Reconciled::resolved(m.to_string(), Resolution::ExactMode);
    }

    // Level 2: no candidate kept a plausible year.
    if parsed.iter().all(|c| c.year.is_none()) {
        // Without a minimum scrape year there is nothing to anchor on; a
        // fabricated year would be worse than no date.
        let Some(min_year) = group.min_year else {
            return Reconciled::unresolved();
        };
        let month = any_mode(parsed.iter().filter_map(|c| c.month)).unwrap_or(MID_YEAR_MONTH);
        return Reconciled::resolved(
            format!("{min_year}{month:02}"),
            Resolution::MinYearMonth,
        );
    }

    // Level 3: anchor on candidates whose year equals the minimum scrape
    // year, when any exist. The restriction intentionally persists into
    // level 4.
    let anchored = group.min_year.is_some() && parsed.iter().any(|c| c.year == group.min_year);
    let eligible: Vec<&str> = parsed
        .iter()
        .filter(|c| !anchored || c.year == group.min_year)
        .filter_map(|c| c.fecha_str.as_deref())
        .collect();

    if anchored {
        if let Some(m) = unique_mode(eligible.iter().copied()) {
            return Reconciled::resolved(m.to_string(), Resolution::MinYearMode);
        }
    }

    // Level 4: most common guess, ties broken by first encounter.
    if let Some(m) = any_mode(eligible.iter().copied()) {
        return Reconciled::resolved(m.to_string(), Resolution::AnyMode);
    }

    // Level 5: reassemble from independently agreed parts. Requires a unique
    // year mode; the month may fall back to mid-year.
    if let Some(year) = unique_mode(parsed.iter().filter_map(|c| c.year)) {
        let month =
            unique_mode(parsed.iter().filter_map(|c| c.month)).unwrap_or(MID_YEAR_MONTH);
        return Reconciled::resolved(format!("{year}{month:02}"), Resolution::PartMode);
    }

    Reconciled::unresolved()
}

/// Frequency table preserving first-encounter order.
fn frequencies<T: PartialEq>(items: impl Iterator<Item = T>) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(v, _)| *v == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    counts
}

/// The mode, provided exactly one value attains the maximum frequency.
fn unique_mode<T: PartialEq>(items: impl Iterator<Item = T>) -> Option<T> {
    let counts = frequencies(items);
    let max = counts.iter().map(|(_, n)| *n).max()?;
    let mut at_max = counts.into_iter().filter(|(_, n)| *n == max);
    let first = at_max.next()?;
    match at_max.next() {
        Some(_) => None,
        None => Some(first.0),
    }
}

/// Any mode: the first-encountered value with maximum frequency.
fn any_mode<T: PartialEq>(items: impl Iterator<Item = T>) -> Option<T> {
    let counts = frequencies(items);
    let max = counts.iter().map(|(_, n)| *n).max()?;
    counts.into_iter().find(|(_, n)| *n == max).map(|(v, _)| v)
}
