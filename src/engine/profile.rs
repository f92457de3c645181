use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::Translation;
use crate::engine::level::CefrLevel;
use crate::engine::normalize::normalize_word;

/// Snapshot saved alongside a word queued for review: the level tag and the
/// last translation seen at the moment it was queued.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub cefr: Option<CefrLevel>,
    pub translation: Option<Translation>,
    pub added_at: DateTime<Utc>,
}

impl ReviewEntry {
    pub fn new(cefr: Option<CefrLevel>, translation: Option<Translation>) -> Self {
        Self {
            cefr,
            translation,
            added_at: Utc::now(),
        }
    }
}

/// The learner's persistent vocabulary record. All lookups and mutations are
/// keyed on the normalized word, so "Foo." and "foo" are the same entry.
///
/// Invariant: `learned_words` and the review list keys are disjoint. The
/// mutating operations below preserve it; nothing else writes these sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub learned_words: BTreeSet<String>,
    pub review_list: BTreeMap<String, ReviewEntry>,
}

impl LearnerProfile {
    pub fn is_learned(&self, word: &str) -> bool {
        self.learned_words.contains(&normalize_word(word))
    }

    /// Mark a word mastered, dropping any pending review entry for it.
    /// Idempotent. Returns false when the word was already learned.
    pub fn mark_learned(&mut self, word: &str) -> bool {
        let key = normalize_word(word);
        self.review_list.remove(&key);
        self.learned_words.insert(key)
    }

    /// Queue a word for review, overwriting any earlier entry. Inserting an
    /// already-learned word is silently rejected so the disjointness
    /// invariant survives careless callers.
    pub fn add_to_review(&mut self, word: &str, entry: ReviewEntry) -> bool {
        let key = normalize_word(word);
        if self.learned_words.contains(&key) {
            return false;
        }
        self.review_list.insert(key, entry);
        true
    }

    /// Drop a word from the review list; no-op if it is not queued.
    pub fn remove_from_review(&mut self, word: &str) -> bool {
        self.review_list.remove(&normalize_word(word)).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ReviewEntry {
        ReviewEntry::new(Some(CefrLevel::B2), None)
    }

    #[test]
    fn mark_learned_is_idempotent() {
        let mut profile = LearnerProfile::default();
        assert!(profile.mark_learned("Foo."));
        let snapshot = profile.clone();
        assert!(!profile.mark_learned("foo"));
        assert_eq!(profile, snapshot);
    }

    #[test]
    fn marking_learned_removes_the_review_entry() {
        let mut profile = LearnerProfile::default();
        profile.add_to_review("ambitious", entry());
        profile.mark_learned("Ambitious,");
        assert!(profile.review_list.is_empty());
        assert!(profile.is_learned("ambitious"));
    }

    #[test]
    fn review_insert_for_learned_word_is_rejected() {
        let mut profile = LearnerProfile::default();
        profile.mark_learned("ubiquitous");
        assert!(!profile.add_to_review("Ubiquitous", entry()));
        assert!(profile.review_list.is_empty());
    }

    #[test]
    fn disjointness_holds_after_arbitrary_op_sequences() {
        let mut profile = LearnerProfile::default();
        let words = ["alpha", "Beta.", "gamma", "ALPHA", "delta?"];
        for (i, word) in words.iter().cycle().take(40).enumerate() {
            match i % 3 {
                0 => {
                    profile.add_to_review(word, entry());
                }
                1 => {
                    profile.mark_learned(word);
                }
                _ => {
                    profile.remove_from_review(word);
                }
            }
            for learned in &profile.learned_words {
                assert!(
                    !profile.review_list.contains_key(learned),
                    "{learned} is in both sets"
                );
            }
        }
    }

    #[test]
    fn lookups_normalize_their_argument() {
        let mut profile = LearnerProfile::default();
        profile.add_to_review("\"Quoted\"", entry());
        assert!(profile.review_list.contains_key("quoted"));
        assert!(profile.remove_from_review("quoted!"));
    }
}
