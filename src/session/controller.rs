use anyhow::Result;

use crate::client::{ServiceError, Translation};
use crate::engine::level::{CefrLevel, LevelController};
use crate::engine::profile::{LearnerProfile, ReviewEntry};
use crate::engine::token::Token;
use crate::store::json_store::JsonStore;

/// Transient per-selection view state consumed by the word-details panel.
/// Never persisted.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub selected: Option<Token>,
    pub translation: Option<Result<Translation, ServiceError>>,
    pub translation_loading: bool,
}

/// A translation request armed by `select_word`. The caller dispatches it on
/// a worker thread and routes the tagged response back through
/// `apply_translation`.
#[derive(Clone, Debug)]
pub struct TranslateRequest {
    pub seq: u64,
    pub word: String,
    pub context: String,
}

/// An analysis request armed by `begin_analysis`; same dispatch contract as
/// `TranslateRequest`.
#[derive(Clone, Debug)]
pub struct AnalyzeRequest {
    pub seq: u64,
    pub text: String,
    pub level: CefrLevel,
}

/// Learner commands that mutate the persistent profile.
#[derive(Clone, Debug)]
pub enum LearnerAction {
    MarkLearned(String),
    AddReview(String, ReviewEntry),
    RemoveReview(String),
}

/// Orchestrates one reading session: owns the profile, the adaptive level
/// machine, the analyzed document, and the selection view state.
///
/// The session never performs I/O on its own. Network calls are armed here
/// (sequence-numbered request descriptors) and executed by the caller;
/// responses are applied back with the stale-discard rule, so a slow earlier
/// response can never overwrite the state of a later selection.
pub struct Session {
    pub profile: LearnerProfile,
    pub level: LevelController,
    pub tokens: Vec<Token>,
    pub text: String,
    pub view: ViewState,
    pub analysis_loading: bool,
    pub analysis_error: Option<ServiceError>,
    store: Option<JsonStore>,
    context_chars: usize,
    translate_seq: u64,
    analyze_seq: u64,
}

impl Session {
    pub fn new(
        profile: LearnerProfile,
        level: CefrLevel,
        store: Option<JsonStore>,
        context_chars: usize,
    ) -> Self {
        Self {
            profile,
            level: LevelController::new(level),
            tokens: Vec::new(),
            text: String::new(),
            view: ViewState::default(),
            analysis_loading: false,
            analysis_error: None,
            store,
            context_chars,
            translate_seq: 0,
            analyze_seq: 0,
        }
    }

    /// Handle a word selection: feed the level machine first (skipped for
    /// tokens without a CEFR tag), then arm a translation request for the
    /// word with a leading slice of the current text as context.
    ///
    /// Returns the request to dispatch and, when the level machine fired,
    /// the new target level for the caller to announce.
    pub fn select_word(&mut self, token: &Token) -> (TranslateRequest, Option<CefrLevel>) {
        let level_change = token.cefr.and_then(|cefr| self.level.record_lookup(cefr));

        self.translate_seq += 1;
        self.view.selected = Some(token.clone());
        self.view.translation = None;
        self.view.translation_loading = true;

        let context: String = self.text.chars().take(self.context_chars).collect();
        let request = TranslateRequest {
            seq: self.translate_seq,
            word: token.text.clone(),
            context,
        };
        (request, level_change)
    }

    /// Apply a translation response. Responses carry the sequence number of
    /// the request that produced them; anything but the latest is stale and
    /// dropped on the floor.
    pub fn apply_translation(&mut self, seq: u64, result: Result<Translation, ServiceError>) {
        if seq != self.translate_seq {
            return;
        }
        self.view.translation = Some(result);
        self.view.translation_loading = false;
    }

    /// Arm an analysis request for `text` at the current target level.
    /// Empty input is rejected here, before any external call.
    pub fn begin_analysis(&mut self, text: &str) -> Result<AnalyzeRequest, ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::Validation(
                "Please enter some text to analyze.".to_string(),
            ));
        }

        self.analyze_seq += 1;
        self.text = text.to_string();
        self.analysis_loading = true;
        self.analysis_error = None;

        Ok(AnalyzeRequest {
            seq: self.analyze_seq,
            text: text.to_string(),
            level: self.level.current(),
        })
    }

    /// Apply an analysis response, with the same stale-discard rule as
    /// translations: only the most recent request's result is retained.
    /// Returns false when the response was stale and nothing changed, so the
    /// caller knows not to touch the reading position.
    pub fn apply_analysis(&mut self, seq: u64, result: Result<Vec<Token>, ServiceError>) -> bool {
        if seq != self.analyze_seq {
            return false;
        }
        self.analysis_loading = false;
        match result {
            Ok(tokens) => {
                self.tokens = tokens;
                self.analysis_error = None;
                // A fresh document invalidates the previous selection.
                self.view = ViewState::default();
            }
            Err(e) => self.analysis_error = Some(e),
        }
        true
    }

    /// Install an already-analyzed document (the bundled sample) without
    /// touching the sequence counters.
    pub fn set_document(&mut self, text: String, tokens: Vec<Token>) {
        self.text = text;
        self.tokens = tokens;
        self.analysis_loading = false;
        self.analysis_error = None;
        self.view = ViewState::default();
    }

    /// Execute a learner command against the profile, persist the result,
    /// and return a user-facing confirmation message.
    pub fn commit(&mut self, action: LearnerAction) -> Result<String> {
        let message = match action {
            LearnerAction::MarkLearned(word) => {
                self.profile.mark_learned(&word);
                format!("\"{word}\" marked as learned! It won't be highlighted as hard anymore.")
            }
            LearnerAction::AddReview(word, entry) => {
                if self.profile.add_to_review(&word, entry) {
                    format!("\"{word}\" added to your study list.")
                } else {
                    format!("\"{word}\" is already marked as learned.")
                }
            }
            LearnerAction::RemoveReview(word) => {
                self.profile.remove_from_review(&word);
                format!("\"{word}\" removed from your study list.")
            }
        };

        if let Some(ref store) = self.store {
            store.save_profile(&self.profile)?;
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn word(text: &str, cefr: Option<CefrLevel>) -> Token {
        Token {
            text: text.to_string(),
            cefr,
            importance: 2,
            is_difficult: false,
        }
    }

    fn make_session() -> Session {
        Session::new(LearnerProfile::default(), CefrLevel::B1, None, 200)
    }

    fn ok_translation(text: &str) -> Result<Translation, ServiceError> {
        Ok(Translation {
            translation: text.to_string(),
            root: None,
            example: None,
        })
    }

    #[test]
    fn stale_translation_response_is_discarded() {
        let mut session = make_session();
        session.text = "some context".to_string();

        let (first, _) = session.select_word(&word("alpha", Some(CefrLevel::B2)));
        let (second, _) = session.select_word(&word("beta", Some(CefrLevel::B2)));
        assert_ne!(first.seq, second.seq);

        // Request #2 resolves first, then the slow #1 arrives.
        session.apply_translation(second.seq, ok_translation("beta-translation"));
        session.apply_translation(first.seq, ok_translation("alpha-translation"));

        let t = session.view.translation.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(t.translation, "beta-translation");
        assert!(!session.view.translation_loading);
    }

    #[test]
    fn selection_without_cefr_skips_the_level_machine_but_translates() {
        let mut session = make_session();
        let (request, level_change) = session.select_word(&word("—", None));
        assert!(level_change.is_none());
        assert_eq!(session.level.struggle_count(), 0);
        assert_eq!(request.word, "—");
        assert!(session.view.translation_loading);
    }

    #[test]
    fn level_machine_runs_before_the_translation_is_armed() {
        let mut session = make_session();
        session.select_word(&word("easy", Some(CefrLevel::A1)));
        session.select_word(&word("easy", Some(CefrLevel::A1)));
        let (_, change) = session.select_word(&word("easy", Some(CefrLevel::B1)));
        assert_eq!(change, Some(CefrLevel::A2));
        assert_eq!(session.level.current(), CefrLevel::A2);
    }

    #[test]
    fn context_is_capped_to_the_configured_window() {
        let mut session = Session::new(LearnerProfile::default(), CefrLevel::B1, None, 10);
        session.text = "0123456789ABCDEF".to_string();
        let (request, _) = session.select_word(&word("x", None));
        assert_eq!(request.context, "0123456789");
    }

    #[test]
    fn empty_text_is_rejected_before_any_call() {
        let mut session = make_session();
        let err = session.begin_analysis("   \n ").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(!session.analysis_loading);
    }

    #[test]
    fn stale_analysis_response_is_discarded() {
        let mut session = make_session();
        let first = session.begin_analysis("first text").unwrap();
        let second = session.begin_analysis("second text").unwrap();

        let applied = session.apply_analysis(second.seq, Ok(vec![word("kept", Some(CefrLevel::A1))]));
        assert!(applied);
        // The slow earlier response must report unapplied so the caller
        // leaves the reading position alone.
        let applied = session.apply_analysis(first.seq, Ok(vec![word("stale", Some(CefrLevel::A1))]));
        assert!(!applied);

        assert_eq!(session.tokens.len(), 1);
        assert_eq!(session.tokens[0].text, "kept");
    }

    #[test]
    fn analysis_failure_keeps_the_previous_document() {
        let mut session = make_session();
        session.set_document("old".to_string(), vec![word("old", Some(CefrLevel::A1))]);

        let request = session.begin_analysis("new text").unwrap();
        session.apply_analysis(
            request.seq,
            Err(ServiceError::Analysis("provider down".to_string())),
        );

        assert_eq!(session.tokens.len(), 1);
        assert!(session.analysis_error.is_some());
        assert!(!session.analysis_loading);
    }

    #[test]
    fn commits_persist_through_the_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut session = Session::new(
            LearnerProfile::default(),
            CefrLevel::B1,
            Some(store),
            200,
        );

        let msg = session
            .commit(LearnerAction::MarkLearned("Foo.".to_string()))
            .unwrap();
        assert!(msg.contains("marked as learned"));

        let reread = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert!(reread.load_profile().is_learned("foo"));
    }

    #[test]
    fn add_review_for_learned_word_reports_instead_of_corrupting() {
        let mut session = make_session();
        session
            .commit(LearnerAction::MarkLearned("known".to_string()))
            .unwrap();
        let msg = session
            .commit(LearnerAction::AddReview(
                "known".to_string(),
                ReviewEntry::new(None, None),
            ))
            .unwrap();
        assert!(msg.contains("already marked as learned"));
        assert!(session.profile.review_list.is_empty());
    }
}
