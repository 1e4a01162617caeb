use ratatui::widgets::ListState;

use crate::digest::summarizer::MAX_SUMMARY_EMAILS;
use crate::domain::email::Email;
use crate::feed::client::ClientError;
use crate::feed::digest::DigestState;
use crate::feed::state::{FeedCommand, FeedEvent, FeedState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Summary,
}

/// Work the event loop must start on behalf of the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Fetch(u32),
    Summarize(Vec<Email>),
    Quit,
}

/// Results coming back from spawned requests.
#[derive(Debug)]
pub enum AppMessage {
    Page {
        page: u32,
        result: Result<Vec<Email>, ClientError>,
    },
    Summary(Result<String, ClientError>),
}

pub struct AppState {
    pub feed: FeedState,
    pub digest: DigestState,
    pub list_state: ListState,
    pub focus: Focus,
    pub summary_scroll: u16,
    /// Set when a movement lands on the sentinel row, consumed by the next poll.
    sentinel_reached: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            feed: FeedState::new(),
            digest: DigestState::new(),
            list_state: ListState::default(),
            focus: Focus::List,
            summary_scroll: 0,
            sentinel_reached: false,
        }
    }

    pub fn apply_feed(&mut self, event: FeedEvent) -> Option<Action> {
        let cmd = self.feed.apply(event)?;
        match cmd {
            FeedCommand::Fetch { page } => Some(Action::Fetch(page)),
        }
    }

    /// The sentinel becomes visible when a movement lands on its row. Resting
    /// on the row does not trigger again, so a failed page waits for the user.
    pub fn poll_sentinel(&mut self) -> Option<Action> {
        if !std::mem::take(&mut self.sentinel_reached) {
            return None;
        }
        let sentinel = self.feed.sentinel()?;
        if self.list_state.selected()? != self.feed.sentinel_index()? {
            return None;
        }
        self.apply_feed(FeedEvent::SentinelVisible { sentinel })
    }

    /// Restart loading after the first page failed.
    pub fn reload(&mut self) -> Option<Action> {
        self.apply_feed(FeedEvent::SessionReady)
    }

    pub fn on_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Page { page, result } => {
                let event = match result {
                    Ok(emails) => FeedEvent::PageLoaded { page, emails },
                    Err(e) => FeedEvent::PageFailed {
                        page,
                        error: e.to_string(),
                    },
                };
                self.apply_feed(event);
                if self.list_state.selected().is_none() && !self.feed.emails().is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            AppMessage::Summary(result) => {
                self.digest.finish(result);
                self.summary_scroll = 0;
            }
        }
    }

    /// Start a digest of the loaded emails unless one is already running.
    pub fn request_summary(&mut self) -> Option<Action> {
        if self.feed.emails().is_empty() || !self.digest.begin() {
            return None;
        }
        let snapshot = self
            .feed
            .emails()
            .iter()
            .take(MAX_SUMMARY_EMAILS)
            .cloned()
            .collect();
        Some(Action::Summarize(snapshot))
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.feed.emails().len() as i32;
        if len == 0 {
            self.list_state.select(None);
            self.sentinel_reached = false;
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        self.list_state.select(Some(next));
        self.sentinel_reached = self.feed.sentinel_index() == Some(next);
    }

    pub fn scroll_summary(&mut self, delta: i32) {
        if delta < 0 {
            self.summary_scroll = self.summary_scroll.saturating_sub((-delta) as u16);
        } else {
            self.summary_scroll = self.summary_scroll.saturating_add(delta as u16);
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::List => Focus::Summary,
            Focus::Summary => Focus::List,
        };
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
