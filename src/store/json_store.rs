use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::engine::profile::LearnerProfile;
use crate::store::schema::{LearnedWordsData, ReviewListData};

const LEARNED_WORDS_FILE: &str = "learned_words.json";
const REVIEW_LIST_FILE: &str = "review_list.json";

/// Durable key/value-style JSON storage for the learner profile. Loads are
/// parse-or-default (a corrupt or stale-schema file is treated as absent,
/// never an error); saves are atomic per file (tmp + fsync + rename).
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordahead");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Assemble the in-memory profile from the two persisted records. A
    /// record with a stale schema version resets independently of the other.
    ///
    /// The two records are written one after the other, so a crash between
    /// the writes can leave a word in both. Learned wins on load: any review
    /// entry shadowed by a learned word is dropped, keeping the sets
    /// disjoint in memory.
    pub fn load_profile(&self) -> LearnerProfile {
        let learned: LearnedWordsData = self.load(LEARNED_WORDS_FILE);
        let learned = if learned.needs_reset() {
            LearnedWordsData::default()
        } else {
            learned
        };

        let review: ReviewListData = self.load(REVIEW_LIST_FILE);
        let mut review = if review.needs_reset() {
            ReviewListData::default()
        } else {
            review
        };
        review
            .entries
            .retain(|word, _| !learned.words.contains(word));

        LearnerProfile {
            learned_words: learned.words,
            review_list: review.entries,
        }
    }

    /// Persist the full profile. Both records are rewritten; each write is
    /// atomic on its own, which is the crash-consistency granularity the
    /// profile needs (entries are keyed per word).
    pub fn save_profile(&self, profile: &LearnerProfile) -> Result<()> {
        let learned = LearnedWordsData {
            words: profile.learned_words.clone(),
            ..LearnedWordsData::default()
        };
        self.save(LEARNED_WORDS_FILE, &learned)?;

        let review = ReviewListData {
            entries: profile.review_list.clone(),
            ..ReviewListData::default()
        };
        self.save(REVIEW_LIST_FILE, &review)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::level::CefrLevel;
    use crate::engine::profile::ReviewEntry;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_files_load_as_an_empty_profile() {
        let (_dir, store) = make_test_store();
        assert_eq!(store.load_profile(), LearnerProfile::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = make_test_store();

        let mut profile = LearnerProfile::default();
        profile.mark_learned("hello");
        profile.add_to_review("ambitious", ReviewEntry::new(Some(CefrLevel::B2), None));
        store.save_profile(&profile).unwrap();

        assert_eq!(store.load_profile(), profile);
    }

    #[test]
    fn corrupt_record_resets_without_failing() {
        let (_dir, store) = make_test_store();

        let mut profile = LearnerProfile::default();
        profile.mark_learned("hello");
        profile.add_to_review("ambitious", ReviewEntry::new(None, None));
        store.save_profile(&profile).unwrap();

        fs::write(store.file_path(LEARNED_WORDS_FILE), "not json{{{").unwrap();

        // The corrupt record resets; the intact one survives.
        let loaded = store.load_profile();
        assert!(loaded.learned_words.is_empty());
        assert!(loaded.review_list.contains_key("ambitious"));
    }

    #[test]
    fn torn_write_across_records_keeps_the_sets_disjoint() {
        let (_dir, store) = make_test_store();

        let mut profile = LearnerProfile::default();
        profile.add_to_review("beta", ReviewEntry::new(Some(CefrLevel::B1), None));
        store.save_profile(&profile).unwrap();

        // Crash window: the learned-words record landed but the review-list
        // rewrite that would have dropped "beta" never did.
        fs::write(
            store.file_path(LEARNED_WORDS_FILE),
            r#"{"schema_version": 1, "words": ["beta"]}"#,
        )
        .unwrap();

        let loaded = store.load_profile();
        assert!(loaded.is_learned("beta"));
        assert!(
            loaded.review_list.is_empty(),
            "learned word must shadow its stale review entry"
        );
    }

    #[test]
    fn stale_schema_version_resets_that_record() {
        let (_dir, store) = make_test_store();

        let mut profile = LearnerProfile::default();
        profile.mark_learned("hello");
        store.save_profile(&profile).unwrap();

        let raw = fs::read_to_string(store.file_path(LEARNED_WORDS_FILE)).unwrap();
        let bumped = raw.replace("\"schema_version\": 1", "\"schema_version\": 99");
        fs::write(store.file_path(LEARNED_WORDS_FILE), bumped).unwrap();

        assert!(store.load_profile().learned_words.is_empty());
    }

    #[test]
    fn no_residual_tmp_files_after_save() {
        let (dir, store) = make_test_store();
        store.save_profile(&LearnerProfile::default()).unwrap();

        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty());
    }
}
