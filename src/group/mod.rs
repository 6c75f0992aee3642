//! Filtering and (person, role) grouping between the two engines.
//!
//! The classifier works per record; the reconciler works per group. This
//! module is the bridge: it drops the roster noise the scraper leaves behind
//! and folds classified entries into [`RoleGroup`]s with their minimum
//! observed scrape year.

use std::collections::{HashMap, HashSet};

use crate::domain::{ClassifiedEntry, DisclosureEntry, OfficialRecord, Role, RoleGroup};

/// Portal sentinel: no disclosure exists for this (person, year).
pub const NO_DATA_SENTINEL: &str = "No data";
/// Portal sentinel: a disclosure exists but no document could be retrieved.
pub const ZERO_DOC_SENTINEL: &str = "0";

/// Drop scraper noise from the raw roster.
///
/// For persons with at least one real appearance, the `"No data"` filler rows
/// are dropped; persons with only filler rows keep them (they still document
/// that the person was looked up). Exact duplicate rows are removed either
/// way, first occurrence kept.
pub fn drop_undocumented_duplicates(entries: Vec<DisclosureEntry>) -> Vec<DisclosureEntry> {
    let mut has_data: HashMap<&str, bool> = HashMap::new();
    for e in &entries {
        let real = e.document_id != NO_DATA_SENTINEL;
        *has_data.entry(e.person_id.as_str()).or_default() |= real;
    }
    let documented: HashSet<String> = has_data
        .into_iter()
        .filter_map(|(id, real)| real.then(|| id.to_string()))
        .collect();

    let mut seen: HashSet<DisclosureEntry> = HashSet::new();
    entries
        .into_iter()
        .filter(|e| e.document_id != NO_DATA_SENTINEL || !documented.contains(&e.person_id))
        .filter(|e| seen.insert(e.clone()))
        .collect()
}

/// Extract the deduplicated roster: one [`OfficialRecord`] per person, first
/// appearance kept, input order preserved.
pub fn roster<'a>(entries: impl IntoIterator<Item = &'a DisclosureEntry>) -> Vec<OfficialRecord> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.person_id.as_str()))
        .map(|e| OfficialRecord {
            person_id: e.person_id.clone(),
            full_name: e.full_name.clone(),
        })
        .collect()
}

/// Fold classified entries into per-(person, role) candidate groups.
///
/// Only judge/prosecutor entries survive. Within a group, entries whose
/// `document_id` is a sentinel are dropped, except when every document in the
/// group is `"0"`: such a group is kept whole as the "no document" class (the
/// person filed disclosures the portal never digitized, which is still worth
/// a best-effort date from the scrape years alone).
///
/// `min_year` is taken over the group's entries before the document filter,
/// so an undocumented early appearance still anchors the plausibility window.
/// Entries are deduplicated per document, first occurrence kept. Output order
/// follows first appearance in the input; the reconciler does not care.
pub fn build_groups(classified: &[ClassifiedEntry]) -> Vec<RoleGroup> {
    let mut order: Vec<(String, Role)> = Vec::new();
    let mut by_key: HashMap<(String, Role), Vec<&ClassifiedEntry>> = HashMap::new();

    for c in classified {
        if !c.role.is_official() {
            continue;
        }
        if c.entry.document_id == NO_DATA_SENTINEL {
            continue;
        }
        let key = (c.entry.person_id.clone(), c.role);
        by_key
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key.clone());
                Vec::new()
            })
            .push(c);
    }

    order
        .into_iter()
        .map(|key| {
            let members = &by_key[&key];
            let min_year = members.iter().filter_map(|c| c.entry.year_value()).min();
            let all_zero = members
                .iter()
                .all(|c| c.entry.document_id == ZERO_DOC_SENTINEL);

            let mut seen_docs: HashSet<&str> = HashSet::new();
            let candidates = members
                .iter()
                .filter(|c| all_zero || c.entry.document_id != ZERO_DOC_SENTINEL)
                .filter(|c| seen_docs.insert(c.entry.document_id.as_str()))
                .map(|c| c.entry.from_field.clone())
                .collect();

            RoleGroup {
                person_id: key.0,
                role: key.1,
                min_year,
                candidates,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(person: &str, doc: &str, year: &str, from: &str) -> DisclosureEntry {
        DisclosureEntry {
            person_id: person.to_string(),
            full_name: None,
            job_title: "JUEZ".to_string(),
            institution: "CORTE SUPERIOR".to_string(),
            document_id: doc.to_string(),
            year: year.to_string(),
            from_field: from.to_string(),
        }
    }

    fn classified(person: &str, role: Role, doc: &str, year: &str, from: &str) -> ClassifiedEntry {
        ClassifiedEntry {
            entry: entry(person, doc, year, from),
            role,
            confidence: role.is_official().then_some(100.0),
        }
    }

    #[test]
    fn no_data_rows_dropped_only_for_documented_persons() {
        let entries = vec![
            entry("A", "doc1", "2010", ""),
            entry("A", NO_DATA_SENTINEL, "2011", ""),
            entry("B", NO_DATA_SENTINEL, "2012", ""),
        ];
        let kept = drop_undocumented_duplicates(entries);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().any(|e| e.person_id == "A" && e.document_id == "doc1"));
        // B only ever produced filler rows, so they stay.
        assert!(kept.iter().any(|e| e.person_id == "B"));
    }

    #[test]
    fn roster_keeps_one_record_per_person() {
        let entries = vec![
            entry("A", "d1", "2010", ""),
            entry("A", "d2", "2011", ""),
            entry("B", "d3", "2012", ""),
        ];
        let officials = roster(&entries);
        assert_eq!(officials.len(), 2);
        assert_eq!(officials[0].person_id, "A");
        assert_eq!(officials[1].person_id, "B");
    }

    #[test]
    fn exact_duplicates_are_removed() {
        let entries = vec![
            entry("A", "doc1", "2010", "2010-01-01"),
            entry("A", "doc1", "2010", "2010-01-01"),
        ];
        assert_eq!(drop_undocumented_duplicates(entries).len(), 1);
    }

    #[test]
    fn non_official_roles_are_discarded() {
        let input = vec![
            classified("A", Role::Other, "doc1", "2010", ""),
            classified("A", Role::Unknown, "doc2", "2010", ""),
        ];
        assert!(build_groups(&input).is_empty());
    }

    #[test]
    fn groups_are_keyed_by_person_and_role() {
        let input = vec![
            classified("A", Role::Judge, "d1", "2010", "2010-01-01"),
            classified("A", Role::Prosecutor, "d2", "2008", "2008-02-01"),
            classified("A", Role::Judge, "d3", "2011", "2010-01-02"),
        ];
        let groups = build_groups(&input);
        assert_eq!(groups.len(), 2);
        let judge = groups.iter().find(|g| g.role == Role::Judge).unwrap();
        assert_eq!(judge.candidates.len(), 2);
        assert_eq!(judge.min_year, Some(2010));
    }

    #[test]
    fn zero_documents_dropped_unless_group_is_all_zero() {
        let mixed = vec![
            classified("A", Role::Judge, "d1", "2010", "2010-01-01"),
            classified("A", Role::Judge, ZERO_DOC_SENTINEL, "2009", "x"),
        ];
        let groups = build_groups(&mixed);
        assert_eq!(groups[0].candidates, vec!["2010-01-01".to_string()]);
        // The undocumented appearance still anchors min_year.
        assert_eq!(groups[0].min_year, Some(2009));

        let all_zero = vec![
            classified("B", Role::Judge, ZERO_DOC_SENTINEL, "2010", ""),
            classified("B", Role::Judge, ZERO_DOC_SENTINEL, "2011", ""),
        ];
        let groups = build_groups(&all_zero);
        assert_eq!(groups.len(), 1);
        // Kept whole as the "no document" class; dedup by document id leaves
        // one candidate.
        assert_eq!(groups[0].candidates.len(), 1);
        assert_eq!(groups[0].min_year, Some(2010));
    }

    #[test]
    fn duplicate_documents_contribute_once() {
        let input = vec![
            classified("A", Role::Judge, "d1", "2010", "2010-01-01"),
            classified("A", Role::Judge, "d1", "2010", "2010-01-01"),
        ];
        assert_eq!(build_groups(&input)[0].candidates.len(), 1);
    }

    #[test]
    fn no_data_documents_never_reach_a_group() {
        let input = vec![
            classified("A", Role::Judge, NO_DATA_SENTINEL, "2010", ""),
            classified("A", Role::Judge, "d1", "2011", "2011-05-01"),
        ];
        let groups = build_groups(&input);
        assert_eq!(groups[0].candidates, vec!["2011-05-01".to_string()]);
        assert_eq!(groups[0].min_year, Some(2011));
    }
}
