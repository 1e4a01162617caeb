use std::fmt::Display;

use log::error;

/// Summary panel state: the last good digest and whether one is in flight.
#[derive(Debug, Default)]
pub struct DigestState {
    summarizing: bool,
    summary: Option<String>,
    last_error: Option<String>,
}

impl DigestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_summarizing(&self) -> bool {
        self.summarizing
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns false if a request is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.summarizing {
            return false;
        }
        self.summarizing = true;
        true
    }

    /// A failure leaves the previous summary in place.
    pub fn finish<E: Display>(&mut self, result: Result<String, E>) {
        self.summarizing = false;
        match result {
            Ok(summary) => {
                self.summary = Some(summary);
                self.last_error = None;
            }
            Err(e) => {
                error!("failed to summarize emails: {e}");
                self.last_error = Some(e.to_string());
            }
        }
    }
}
