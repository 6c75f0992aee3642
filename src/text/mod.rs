//! Text normalization and fuzzy-scoring primitives.
//!
//! Every string comparison in the classifier assumes text that went through
//! [`normalize`] first: Latin diacritics stripped, whitespace runs collapsed,
//! uppercased, trimmed. Comparing un-normalized text is not supported.

use deunicode::deunicode;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WS_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize free text for matching.
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    let folded = deunicode(s);
    let collapsed = WS_RUN.replace_all(&folded, " ");
    collapsed.to_uppercase().trim().to_string()
}

/// Token-sort similarity ratio on a 0–100 scale.
///
/// Both sides are split on whitespace, tokens sorted alphabetically and
/// rejoined, then scored with a normalized Levenshtein distance. This makes
/// the score insensitive to word order ("PENAL FISCAL" vs "FISCAL PENAL"),
/// which matters for OCR text where column order is unstable.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let sa = sort_tokens(a);
    let sb = sort_tokens(b);
    strsim::normalized_levenshtein(&sa, &sb) * 100.0
}

/// Best [`token_sort_ratio`] of `s` against a reference set.
///
/// Returns 0 for an empty set (no match is possible).
pub fn best_ratio<'a>(s: &str, choices: impl IntoIterator<Item = &'a str>) -> f64 {
    choices
        .into_iter()
        .map(|c| token_sort_ratio(s, c))
        .fold(0.0, f64::max)
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_collapses_whitespace() {
        assert_eq!(normalize("  Fiscalía   General\tdel  Estado "), "FISCALIA GENERAL DEL ESTADO");
        assert_eq!(normalize("JUEZ DE LA NIÑEZ"), "JUEZ DE LA NINEZ");
    }

    #[test]
    fn normalize_is_idempotent() {
        let raws = ["  Juez  Décimo  de lo Civil ", "FISCAL", "", "  ", "péñá  ólé"];
        for raw in raws {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn token_sort_ratio_ignores_word_order() {
        let a = token_sort_ratio("FISCAL DE LO PENAL", "PENAL DE LO FISCAL");
        assert!((a - 100.0).abs() < 1e-9);
    }

    #[test]
    fn token_sort_ratio_scores_exact_match_as_100() {
        assert!((token_sort_ratio("JUEZ", "JUEZ") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn best_ratio_empty_set_is_zero() {
        assert_eq!(best_ratio("JUEZ", std::iter::empty()), 0.0);
    }

    #[test]
    fn best_ratio_picks_single_best_match() {
        let choices = ["AGENTE FISCAL", "JUEZ DE LO CIVIL"];
        let s = best_ratio("JUEZ DE LO CIVIL", choices.iter().copied());
        assert!((s - 100.0).abs() < 1e-9);
    }
}
