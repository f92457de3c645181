use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::engine::profile::ReviewEntry;

const SCHEMA_VERSION: u32 = 1;

/// Persisted record of mastered words. One of the two flat documents that
/// make up the learner profile on disk; re-serialized in full on every
/// mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LearnedWordsData {
    pub schema_version: u32,
    pub words: BTreeSet<String>,
}

impl Default for LearnedWordsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            words: BTreeSet::new(),
        }
    }
}

impl LearnedWordsData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

/// Persisted record of words queued for review with their snapshot entries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewListData {
    pub schema_version: u32,
    pub entries: BTreeMap<String, ReviewEntry>,
}

impl Default for ReviewListData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl ReviewListData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
