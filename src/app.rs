use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::client::ApiClient;
use crate::config::Config;
use crate::engine::profile::ReviewEntry;
use crate::event::AppEvent;
use crate::sample;
use crate::session::controller::{AnalyzeRequest, TranslateRequest};
use crate::session::{LearnerAction, Session};
use crate::store::json_store::JsonStore;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Reading,
    Progress,
    Help,
}

/// Transient footer notification (level changes, confirmations, errors).
pub struct StatusMessage {
    pub text: String,
    pub posted_at: Instant,
}

const STATUS_TTL: Duration = Duration::from_secs(5);

pub struct App {
    pub screen: AppScreen,
    pub session: Session,
    pub cursor: Option<usize>,
    pub scroll: u16,
    pub status: Option<StatusMessage>,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    pub review_selected: usize,
    pub review_confirm_delete: bool,
    pub document_name: String,
    client: ApiClient,
    tx: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(config: Config, theme: &'static Theme, tx: mpsc::Sender<AppEvent>) -> Self {
        let store = JsonStore::new().ok();
        let profile = store
            .as_ref()
            .map(|s| s.load_profile())
            .unwrap_or_default();
        let client = ApiClient::new(&config.server_url, config.timeout_secs);
        let session = Session::new(profile, config.level(), store, config.context_chars);

        Self {
            screen: AppScreen::Reading,
            session,
            cursor: None,
            scroll: 0,
            status: None,
            theme,
            config,
            should_quit: false,
            review_selected: 0,
            review_confirm_delete: false,
            document_name: String::new(),
            client,
            tx,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            posted_at: Instant::now(),
        });
    }

    /// Tick housekeeping: expire the footer notification.
    pub fn tick(&mut self) {
        if let Some(ref status) = self.status {
            if status.posted_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    /// Open the bundled sample document (no analyzer round trip).
    pub fn open_sample(&mut self) {
        match sample::load_sample() {
            Ok((text, tokens)) => {
                self.document_name = "sample".to_string();
                self.session.set_document(text, tokens);
                self.reset_reading_position();
            }
            Err(e) => self.set_status(format!("Failed to load sample: {e}")),
        }
    }

    /// Send a text off for analysis at the current target level.
    pub fn open_text(&mut self, name: &str, text: &str) {
        match self.session.begin_analysis(text) {
            Ok(request) => {
                self.document_name = name.to_string();
                self.dispatch_analysis(request);
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Re-run analysis of the current text, picking up the (possibly
    /// adjusted) target level.
    pub fn reanalyze(&mut self) {
        let text = self.session.text.clone();
        match self.session.begin_analysis(&text) {
            Ok(request) => self.dispatch_analysis(request),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    fn dispatch_analysis(&self, request: AnalyzeRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.analyze(&request.text, request.level);
            let _ = tx.send(AppEvent::Analysis {
                seq: request.seq,
                result,
            });
        });
    }

    fn dispatch_translation(&self, request: TranslateRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.translate(&request.word, &request.context);
            let _ = tx.send(AppEvent::Translation {
                seq: request.seq,
                result,
            });
        });
    }

    pub fn on_analysis(
        &mut self,
        seq: u64,
        result: Result<Vec<crate::engine::token::Token>, crate::client::ServiceError>,
    ) {
        if !self.session.apply_analysis(seq, result) {
            return;
        }
        if let Some(ref e) = self.session.analysis_error {
            self.set_status(format!("Analysis failed: {e}"));
        } else {
            self.reset_reading_position();
        }
    }

    pub fn on_translation(
        &mut self,
        seq: u64,
        result: Result<crate::client::Translation, crate::client::ServiceError>,
    ) {
        self.session.apply_translation(seq, result);
    }

    fn reset_reading_position(&mut self) {
        self.scroll = 0;
        self.cursor = self
            .session
            .tokens
            .iter()
            .position(|t| !t.is_line_break());
    }

    /// Move the cursor to the next selectable token (line breaks are skipped).
    pub fn cursor_next(&mut self) {
        let Some(current) = self.cursor else { return };
        let next = self
            .session
            .tokens
            .iter()
            .enumerate()
            .skip(current + 1)
            .find(|(_, t)| !t.is_line_break())
            .map(|(i, _)| i);
        if next.is_some() {
            self.cursor = next;
        }
    }

    pub fn cursor_prev(&mut self) {
        let Some(current) = self.cursor else { return };
        let prev = self.session.tokens[..current]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, t)| !t.is_line_break())
            .map(|(i, _)| i);
        if prev.is_some() {
            self.cursor = prev;
        }
    }

    /// Select the word under the cursor: run the level machine, then kick
    /// off a translation request in the background.
    pub fn select_cursor_word(&mut self) {
        let Some(i) = self.cursor else { return };
        let Some(token) = self.session.tokens.get(i).cloned() else {
            return;
        };

        let (request, level_change) = self.session.select_word(&token);
        if let Some(new_level) = level_change {
            self.set_status(format!(
                "We noticed you're looking up common words. Adjusting level to {new_level} for better support."
            ));
        }
        self.dispatch_translation(request);
    }

    pub fn clear_selection(&mut self) {
        self.session.view = Default::default();
    }

    /// Mark the currently selected word learned.
    pub fn mark_selected_learned(&mut self) {
        let Some(word) = self.session.view.selected.as_ref().map(|t| t.text.clone()) else {
            return;
        };
        self.commit_with_status(LearnerAction::MarkLearned(word));
    }

    /// Queue the currently selected word for review, snapshotting the level
    /// tag and whatever translation has arrived so far.
    pub fn add_selected_to_review(&mut self) {
        let Some(token) = self.session.view.selected.clone() else {
            return;
        };
        let translation = self
            .session
            .view
            .translation
            .as_ref()
            .and_then(|r| r.as_ref().ok())
            .cloned();
        let entry = ReviewEntry::new(token.cefr, translation);
        self.commit_with_status(LearnerAction::AddReview(token.text, entry));
    }

    /// Remove the review entry selected in the progress dashboard.
    pub fn remove_selected_review(&mut self) {
        let Some(word) = self
            .session
            .profile
            .review_list
            .keys()
            .nth(self.review_selected)
            .cloned()
        else {
            return;
        };
        self.commit_with_status(LearnerAction::RemoveReview(word));
        let len = self.session.profile.review_list.len();
        if self.review_selected >= len {
            self.review_selected = len.saturating_sub(1);
        }
    }

    fn commit_with_status(&mut self, action: LearnerAction) {
        match self.session.commit(action) {
            Ok(message) => self.set_status(message),
            Err(e) => self.set_status(format!("Failed to save profile: {e}")),
        }
    }

    pub fn review_next(&mut self) {
        let len = self.session.profile.review_list.len();
        if len > 0 {
            self.review_selected = (self.review_selected + 1).min(len - 1);
        }
    }

    pub fn review_prev(&mut self) {
        self.review_selected = self.review_selected.saturating_sub(1);
    }

    pub fn go_to_progress(&mut self) {
        self.review_selected = 0;
        self.review_confirm_delete = false;
        self.screen = AppScreen::Progress;
    }

    pub fn go_to_reading(&mut self) {
        self.review_confirm_delete = false;
        self.screen = AppScreen::Reading;
    }

    pub fn go_to_help(&mut self) {
        self.screen = AppScreen::Help;
    }
}
