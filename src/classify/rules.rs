//! The override rule cascade.
//!
//! No single signal (fuzzy score, title prefix, institution) is reliable
//! alone against OCR-corrupted, abbreviation-heavy source text, so the
//! classifier layers an ordered list of (predicate, effect) rules on top of
//! the fuzzy result. The ordering encodes a precedence of hard textual
//! evidence over fuzzy statistical evidence.
//!
//! Evaluation model: every rule is applied unconditionally, in declaration
//! order, and later rules overwrite earlier ones for the records they match.
//! This is NOT a short-circuiting if/else chain; the final label is
//! rule-order-deterministic rather than order-independent.
//!
//! All predicates assume [`crate::text::normalize`]d input (uppercase,
//! accent-free, single-spaced). The misspelled alternations (`JUAZA`,
//! `TRIBYUNAL`, `GANETE`, ...) are recurring OCR corruptions observed in the
//! corpus, not typos.

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::Role;

lazy_static! {
    /// Judge/magistrate/alternate-judge title prefixes, OCR variants included.
    static ref JUDGE_PREFIX: Regex = Regex::new(
        r"^MAGI|^JUE|^CONJUE|^CON JUE|^EX JUE|^JUAZA|^JEZ\b|^JUZ\b|^JUUZ\b|^JEUZA\b|^JEUEZA\b|^JEUZ\b|^JUAZ\b"
    )
    .unwrap();

    /// Judge-ish institution prefixes (some records put the title there).
    static ref INSTITUTION_JUDGE_PREFIX: Regex =
        Regex::new(r"^JUE|^CONJUE|^CON JUE").unwrap();

    static ref SECRETARY_PREFIX: Regex = Regex::new(r"^SECRE").unwrap();

    /// Court/tribunal/chamber keyword, for the president-of-a-court rule.
    static ref COURT_KEYWORD: Regex = Regex::new(r"CORTE|TRIBUNAL|TRIBYUNAL|SALA").unwrap();
    /// President/minister keyword, same rule.
    static ref PRESIDENT_KEYWORD: Regex = Regex::new(r"^PRESI|^PRESDIENTE|\bMINIS").unwrap();

    /// Prosecutor/agent/ex-prosecutor title prefixes, OCR variants included.
    static ref PROSECUTOR_PREFIX: Regex = Regex::new(
        r"^FISCAL|^AG|^GANETE|AGENTE FISCAL|^EGENTE|^EX- FISCAL|^EX-MINISTRO FISCAL"
    )
    .unwrap();

    static ref MINISTER_PREFIX: Regex = Regex::new(r"^MINIST").unwrap();

    /// Abbreviated prosecution-office institutions ("FISCALIA...", "FISC.").
    static ref PROSECUTION_ABBREV: Regex = Regex::new(r"^FI").unwrap();
    /// Fuzzy "F.G.E." (Fiscalía General del Estado) spelling variants.
    static ref FGE_PATTERN: Regex = Regex::new(r"F.?G.?E").unwrap();
    /// Judiciary keywords that override any prosecution-office signal.
    static ref JUDICIARY_KEYWORD: Regex = Regex::new(r"JUDICIAL|TRIBUNAL").unwrap();
}

/// Literal title string produced by a known-bad OCR read of "ABOGADO".
const KNOWN_BAD_TITLE: &str = "AGOGADO";

/// The per-record inputs a rule can look at.
pub struct RuleCtx<'a> {
    /// Normalized job title.
    pub title: &'a str,
    /// Normalized institution.
    pub institution: &'a str,
    /// Result of [`is_prosecution_office`] on the institution.
    pub prosecution_office: bool,
}

/// Mutable classification state threaded through the cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub role: Role,
    pub confidence: Option<f64>,
}

impl Label {
    fn set(&mut self, role: Role, confidence: Option<f64>) {
        self.role = role;
        self.confidence = confidence;
    }

    /// True when a confidence is present and strictly below `bound`.
    ///
    /// An absent confidence compares as false on purpose: threshold rules
    /// must not fire on records that no longer carry a score.
    fn confidence_below(&self, bound: f64) -> bool {
        self.confidence.is_some_and(|c| c < bound)
    }
}

/// One named override rule.
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&RuleCtx<'_>, &mut Label),
}

/// The fixed cascade, in evaluation order.
pub static CASCADE: &[Rule] = &[
    Rule { name: "judge title prefix", apply: judge_title_prefix },
    Rule { name: "judge word in title", apply: judge_word_in_title },
    Rule { name: "secretary prefix", apply: secretary_prefix },
    Rule { name: "judge institution prefix", apply: judge_institution_prefix },
    Rule { name: "court president", apply: court_president },
    Rule { name: "prosecutor title prefix", apply: prosecutor_title_prefix },
    Rule { name: "minister of prosecution office", apply: minister_of_prosecution_office },
    Rule { name: "known bad OCR title", apply: known_bad_ocr_title },
    Rule { name: "empty title", apply: empty_title },
    Rule { name: "overall confidence floor", apply: overall_confidence_floor },
    Rule { name: "weak match in prosecution office", apply: weak_match_in_prosecution_office },
    Rule { name: "weak prosecutor match", apply: weak_prosecutor_match },
    Rule { name: "weak judge match", apply: weak_judge_match },
];

fn judge_title_prefix(ctx: &RuleCtx<'_>, label: &mut Label) {
    if JUDGE_PREFIX.is_match(ctx.title) {
        label.set(Role::Judge, Some(100.0));
    }
}

fn judge_word_in_title(ctx: &RuleCtx<'_>, label: &mut Label) {
    // "SECRETARIO JUEZ..." also lands here; the secretary rule below wins.
    if ctx.title.contains("JUEZ") && label.confidence_below(100.0) {
        label.set(Role::Judge, Some(100.0));
    }
}

fn secretary_prefix(ctx: &RuleCtx<'_>, label: &mut Label) {
    if SECRETARY_PREFIX.is_match(ctx.title) {
        label.set(Role::Other, None);
    }
}

fn judge_institution_prefix(ctx: &RuleCtx<'_>, label: &mut Label) {
    if INSTITUTION_JUDGE_PREFIX.is_match(ctx.institution) {
        label.set(Role::Judge, Some(100.0));
    }
}

fn court_president(ctx: &RuleCtx<'_>, label: &mut Label) {
    // Requires BOTH a court keyword and a president/minister keyword.
    if COURT_KEYWORD.is_match(ctx.title) && PRESIDENT_KEYWORD.is_match(ctx.title) {
        label.set(Role::Judge, Some(100.0));
    }
}

fn prosecutor_title_prefix(ctx: &RuleCtx<'_>, label: &mut Label) {
    if PROSECUTOR_PREFIX.is_match(ctx.title) {
        label.set(Role::Prosecutor, Some(100.0));
    }
}

fn minister_of_prosecution_office(ctx: &RuleCtx<'_>, label: &mut Label) {
    if ctx.prosecution_office && MINISTER_PREFIX.is_match(ctx.title) {
        label.set(Role::Prosecutor, Some(100.0));
    }
}

fn known_bad_ocr_title(ctx: &RuleCtx<'_>, label: &mut Label) {
    if ctx.title == KNOWN_BAD_TITLE {
        label.set(Role::Other, None);
    }
}

fn empty_title(ctx: &RuleCtx<'_>, label: &mut Label) {
    if ctx.title.is_empty() {
        label.set(Role::Unknown, None);
    }
}

fn overall_confidence_floor(_ctx: &RuleCtx<'_>, label: &mut Label) {
    if label.confidence_below(55.0) {
        label.set(Role::Other, None);
    }
}

fn weak_match_in_prosecution_office(ctx: &RuleCtx<'_>, label: &mut Label) {
    if label.confidence_below(90.0) && ctx.prosecution_office {
        label.set(Role::Other, None);
    }
}

fn weak_prosecutor_match(_ctx: &RuleCtx<'_>, label: &mut Label) {
    if label.confidence_below(90.0) && label.role == Role::Prosecutor {
        label.set(Role::Other, None);
    }
}

fn weak_judge_match(_ctx: &RuleCtx<'_>, label: &mut Label) {
    // Judges need the higher floor: the judge vocabulary overlaps more with
    // unrelated civil-service titles.
    if label.confidence_below(95.0) && label.role == Role::Judge {
        label.set(Role::Other, None);
    }
}

/// Classify a normalized institution string as prosecution-office or not.
///
/// Independent cascade with the same later-rule-wins evaluation: judiciary
/// keywords override any earlier positive signal.
pub fn is_prosecution_office(institution: &str) -> bool {
    let mut office = false;
    if institution.contains("MINISTERIO") && institution.contains("FISCAL") {
        office = true;
    }
    if institution.contains("MINISTERIO") && institution.contains("PUBLICO") {
        office = true;
    }
    if PROSECUTION_ABBREV.is_match(institution) {
        office = true;
    }
    if FGE_PATTERN.is_match(institution) {
        office = true;
    }
    if JUDICIARY_KEYWORD.is_match(institution) {
        office = false;
    }
    office
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prosecution_office_from_ministry_tokens() {
        assert!(is_prosecution_office("MINISTERIO PUBLICO"));
        assert!(is_prosecution_office("MINISTERIO FISCAL DISTRITAL"));
    }

    #[test]
    fn prosecution_office_from_abbreviations() {
        assert!(is_prosecution_office("FISCALIA GENERAL DEL ESTADO"));
        assert!(is_prosecution_office("F.G.E."));
        assert!(is_prosecution_office("FGE AZUAY"));
    }

    #[test]
    fn judiciary_keywords_override_prosecution_signals() {
        // Starts with "FI" but names a tribunal: the later rule wins.
        assert!(!is_prosecution_office("FISCALIA DEL TRIBUNAL SUPREMO"));
        assert!(!is_prosecution_office("MINISTERIO PUBLICO FUNCION JUDICIAL"));
    }

    #[test]
    fn plain_court_is_not_prosecution_office() {
        assert!(!is_prosecution_office("CORTE SUPERIOR DE QUITO"));
    }
}
