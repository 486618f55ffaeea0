//! Affect classifier: rule-based mood detection and reply selection.
//!
//! Evaluates an ordered keyword table against the lower-cased utterance.
//! The first rule with any matching keyword wins; keyword sets overlap, so
//! order is part of the contract. Matching is plain substring containment
//! ("goodbye" contains "good").

use rand::Rng;

use super::replies::ReplyBook;
use crate::types::{AffectCategory, DisplayMood};

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy)]
struct AffectRule {
    category: AffectCategory,
    keywords: &'static [&'static str],
}

/// Evaluated top to bottom. `Neutral` has no row: it is the fallback.
const RULES: &[AffectRule] = &[
    AffectRule {
        category: AffectCategory::Sad,
        keywords: &["sad", "down", "depressed"],
    },
    AffectRule {
        category: AffectCategory::Anxious,
        keywords: &["anxious", "worried", "stressed"],
    },
    AffectRule {
        category: AffectCategory::Happy,
        keywords: &["happy", "good", "great", "excited"],
    },
    AffectRule {
        category: AffectCategory::Tired,
        keywords: &["tired", "exhausted"],
    },
];

/// Category plus the reply picked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub category: AffectCategory,
    pub reply: String,
}

impl ClassificationResult {
    pub fn display_mood(&self) -> DisplayMood {
        self.category.display_mood()
    }
}

/// Resolve the category of an utterance. Deterministic.
pub fn detect(utterance: &str) -> AffectCategory {
    let lower = utterance.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(*k)))
        .map(|rule| rule.category)
        .unwrap_or(AffectCategory::Neutral)
}

/// Stateless classifier over a validated reply book.
/// Holds no mutable state; share it freely across tasks.
#[derive(Debug, Clone, Default)]
pub struct AffectClassifier {
    replies: ReplyBook,
}

impl AffectClassifier {
    pub fn new(replies: ReplyBook) -> Self {
        Self { replies }
    }

    pub fn replies(&self) -> &ReplyBook {
        &self.replies
    }

    /// Category only, no reply pick.
    pub fn category_of(&self, utterance: &str) -> AffectCategory {
        detect(utterance)
    }

    /// Classify an utterance and draw a reply from the matched pool.
    pub fn classify<R: Rng + ?Sized>(&self, utterance: &str, rng: &mut R) -> ClassificationResult {
        let category = detect(utterance);
        let reply = self.replies.pool(category).pick(rng).to_owned();
        ClassificationResult { category, reply }
    }

    /// Same as [`classify`](Self::classify) using the thread-local generator.
    pub fn respond(&self, utterance: &str) -> ClassificationResult {
        self.classify(utterance, &mut rand::thread_rng())
    }
}
