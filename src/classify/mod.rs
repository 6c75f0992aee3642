//! Title classification: raw (job title, institution) → (role, confidence).
//!
//! Two stages, mirroring how the source corpus behaves:
//!
//! 1. **Fuzzy stage** — best token-sort ratio of the normalized title against
//!    the judge and prosecutor reference vocabularies; the higher-scoring set
//!    provides the initial role, a tie yields `Other` with no score.
//! 2. **Override cascade** — the ordered rules in [`rules`], every one
//!    evaluated, later rules overriding earlier ones.
//!
//! `classify` is a pure function of its two string arguments; the only shared
//! state is the immutable vocabulary and the once-compiled pattern registry.

pub mod rules;
pub mod vocab;

use crate::domain::{ClassifiedEntry, DisclosureEntry, Role};
use crate::text::{best_ratio, normalize};

use rules::{Label, RuleCtx};
pub use vocab::Vocabulary;

/// The title classifier. Cheap to clone; holds only the vocabulary.
#[derive(Debug, Clone)]
pub struct Classifier {
    vocab: Vocabulary,
}

impl Classifier {
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }

    pub fn builtin() -> Self {
        Self::new(Vocabulary::builtin())
    }

    /// Resolve one (job title, institution) pair.
    ///
    /// Total function: every input yields a defined (role, confidence), never
    /// an error. Deterministic for identical inputs.
    pub fn classify(&self, job_title: &str, institution: &str) -> (Role, Option<f64>) {
        let title = normalize(job_title);
        let inst = normalize(institution);

        let mut label = self.fuzzy_label(&title);

        let ctx = RuleCtx {
            title: &title,
            institution: &inst,
            prosecution_office: rules::is_prosecution_office(&inst),
        };
        for rule in rules::CASCADE {
            (rule.apply)(&ctx, &mut label);
        }

        (label.role, label.confidence)
    }

    /// Classify a full entry, attaching the result.
    pub fn classify_entry(&self, entry: &DisclosureEntry) -> ClassifiedEntry {
        let (role, confidence) = self.classify(&entry.job_title, &entry.institution);
        ClassifiedEntry {
            entry: entry.clone(),
            role,
            confidence,
        }
    }

    /// Initial label from the fuzzy stage alone.
    fn fuzzy_label(&self, title: &str) -> Label {
        let judge = best_ratio(title, self.vocab.judge_titles());
        let prosecutor = best_ratio(title, self.vocab.prosecutor_titles());

        if judge > prosecutor {
            Label {
                role: Role::Judge,
                confidence: Some(judge),
            }
        } else if prosecutor > judge {
            Label {
                role: Role::Prosecutor,
                confidence: Some(prosecutor),
            }
        } else {
            // Tie: no side wins and no score is kept, so the threshold rules
            // cannot fire on it later.
            Label {
                role: Role::Other,
                confidence: None,
            }
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }
}
