//! Incremental inbox feed.
//!
//! [`FeedState`] owns the loaded emails and the page cursor. Everything that
//! happens to the feed goes through [`FeedState::apply`], which returns the
//! fetch (if any) the host must perform and later report back as
//! [`FeedEvent::PageLoaded`] or [`FeedEvent::PageFailed`].
//!
//! The scroll sentinel is modelled as an id attached to the last loaded
//! email. Entering `Loading` releases it; returning to `Idle` attaches a
//! fresh id, so a trigger raised against an old sentinel is ignored.

use std::collections::HashSet;

use log::{debug, warn};

use crate::domain::email::{Email, EmailId};

pub type SentinelId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    Loading,
}

#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A session (access credential) became available.
    SessionReady,
    /// The sentinel with this id scrolled into view.
    SentinelVisible { sentinel: SentinelId },
    PageLoaded { page: u32, emails: Vec<Email> },
    PageFailed { page: u32, error: String },
    /// The view went away; later results are dropped.
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    Fetch { page: u32 },
}

#[derive(Debug)]
pub struct FeedState {
    emails: Vec<Email>,
    seen: HashSet<EmailId>,
    page: u32,
    status: FeedStatus,
    sentinel: Option<SentinelId>,
    next_sentinel: SentinelId,
    exhausted: bool,
    detached: bool,
    last_error: Option<String>,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            emails: Vec::new(),
            seen: HashSet::new(),
            page: 0,
            status: FeedStatus::Idle,
            sentinel: None,
            next_sentinel: 1,
            exhausted: false,
            detached: false,
            last_error: None,
        }
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    /// Page currently loading, or the last page loaded.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FeedStatus::Loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn sentinel(&self) -> Option<SentinelId> {
        self.sentinel
    }

    /// Index of the email the sentinel is attached to.
    pub fn sentinel_index(&self) -> Option<usize> {
        self.sentinel.map(|_| self.emails.len().saturating_sub(1))
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn apply(&mut self, event: FeedEvent) -> Option<FeedCommand> {
        if self.detached {
            debug!("feed detached; dropping {event:?}");
            return None;
        }

        match event {
            FeedEvent::SessionReady => {
                if self.status == FeedStatus::Loading || self.page != 0 {
                    return None;
                }
                Some(self.begin_loading())
            }

            FeedEvent::SentinelVisible { sentinel } => {
                if self.status == FeedStatus::Loading
                    || self.exhausted
                    || self.sentinel != Some(sentinel)
                {
                    return None;
                }
                Some(self.begin_loading())
            }

            FeedEvent::PageLoaded { page, emails } => {
                if !self.is_in_flight(page) {
                    debug!("ignoring result for page {page}");
                    return None;
                }
                self.status = FeedStatus::Idle;
                self.last_error = None;

                if emails.is_empty() && !self.emails.is_empty() {
                    // An empty page is taken as the end of the inbox.
                    self.exhausted = true;
                    return None;
                }

                self.merge(emails);
                self.attach_sentinel();
                None
            }

            FeedEvent::PageFailed { page, error } => {
                if !self.is_in_flight(page) {
                    return None;
                }
                warn!("loading page {page} failed: {error}");
                self.status = FeedStatus::Idle;
                self.last_error = Some(error);
                self.page -= 1;
                self.attach_sentinel();
                None
            }

            FeedEvent::Detached => {
                self.detached = true;
                self.sentinel = None;
                None
            }
        }
    }

    fn is_in_flight(&self, page: u32) -> bool {
        self.status == FeedStatus::Loading && self.page == page
    }

    fn begin_loading(&mut self) -> FeedCommand {
        self.sentinel = None;
        self.page += 1;
        self.status = FeedStatus::Loading;
        FeedCommand::Fetch { page: self.page }
    }

    fn attach_sentinel(&mut self) {
        if self.emails.is_empty() {
            self.sentinel = None;
            return;
        }
        self.sentinel = Some(self.next_sentinel);
        self.next_sentinel += 1;
    }

    fn merge(&mut self, incoming: Vec<Email>) {
        for email in incoming {
            if self.seen.insert(email.id.clone()) {
                self.emails.push(email);
            }
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}
