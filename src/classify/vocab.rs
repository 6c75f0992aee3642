//! Reference vocabularies for the fuzzy-matching step.
//!
//! These are the controlled title lists the fuzzy scorer compares against.
//! They are tuned to one corpus (Spanish-language judiciary/prosecution
//! titles as they appear on the disclosure portal) and are not meant to be a
//! general taxonomy. Entries are stored normalized so scoring never has to
//! re-normalize them per call.

use crate::text::normalize;

/// Judge-side reference titles.
const JUDGE_TITLES: &[&str] = &[
    "JUEZ",
    "JUEZA",
    "JUEZ DE LO CIVIL",
    "JUEZ DE LO PENAL",
    "JUEZ DE GARANTIAS PENALES",
    "JUEZ DE TRANSITO",
    "JUEZ DE TRABAJO",
    "JUEZ DE INQUILINATO",
    "JUEZ DE LA NINEZ Y ADOLESCENCIA",
    "JUEZ DE LA FAMILIA MUJER NINEZ Y ADOLESCENCIA",
    "JUEZ MULTICOMPETENTE",
    "JUEZ ADJUNTO",
    "JUEZ TEMPORAL",
    "JUEZ OCASIONAL",
    "JUEZ SUPLENTE",
    "JUEZ NACIONAL",
    "JUEZ PROVINCIAL",
    "JUEZ DE CORTE PROVINCIAL",
    "CONJUEZ",
    "CONJUEZ PERMANENTE",
    "CONJUEZ OCASIONAL",
    "CONJUEZ NACIONAL",
    "MAGISTRADO",
    "MAGISTRADA",
    "MINISTRO JUEZ",
    "MINISTRO DE CORTE SUPERIOR",
    "PRESIDENTE DE CORTE SUPERIOR",
    "PRESIDENTE DE LA CORTE PROVINCIAL",
    "PRESIDENTE DE SALA",
    "VOCAL DE TRIBUNAL DISTRITAL",
];

/// Prosecutor-side reference titles.
///
/// The last two entries are verbatim corpus spellings that the fuzzy scorer
/// would otherwise miss.
const PROSECUTOR_TITLES: &[&str] = &[
    "FISCAL",
    "AGENTE FISCAL",
    "AGENTE FISCAL PENAL",
    "AGENTE FISCAL DE LO PENAL",
    "FISCAL DE LO PENAL",
    "FISCAL PROVINCIAL",
    "FISCAL DISTRITAL",
    "FISCAL ADJUNTO",
    "FISCAL GENERAL DEL ESTADO",
    "MINISTRO FISCAL",
    "MINISTRO FISCAL GENERAL",
    "MINISTRO FISCAL DISTRITAL",
    "FISCAL DISTRITO",
    "FISCAL DEL JUZGADO II SUBTENIENTE",
];

/// A pair of normalized reference sets.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    judge_titles: Vec<String>,
    prosecutor_titles: Vec<String>,
}

impl Vocabulary {
    /// The built-in corpus vocabulary.
    pub fn builtin() -> Self {
        Self::from_lists(
            JUDGE_TITLES.iter().copied(),
            PROSECUTOR_TITLES.iter().copied(),
        )
    }

    /// Build a vocabulary from caller-supplied lists (normalized on entry).
    pub fn from_lists<'a>(
        judges: impl IntoIterator<Item = &'a str>,
        prosecutors: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            judge_titles: judges.into_iter().map(normalize).collect(),
            prosecutor_titles: prosecutors.into_iter().map(normalize).collect(),
        }
    }

    pub fn judge_titles(&self) -> impl Iterator<Item = &str> {
        self.judge_titles.iter().map(String::as_str)
    }

    pub fn prosecutor_titles(&self) -> impl Iterator<Item = &str> {
        self.prosecutor_titles.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_vocabulary_is_normalized() {
        let vocab = Vocabulary::builtin();
        for title in vocab.judge_titles().chain(vocab.prosecutor_titles()) {
            assert_eq!(crate::text::normalize(title), title);
        }
    }

    #[test]
    fn from_lists_normalizes_entries() {
        let vocab = Vocabulary::from_lists(["juez  de lo  civil"], ["fiscalía"]);
        assert_eq!(vocab.judge_titles().next(), Some("JUEZ DE LO CIVIL"));
        assert_eq!(vocab.prosecutor_titles().next(), Some("FISCALIA"));
    }
}
