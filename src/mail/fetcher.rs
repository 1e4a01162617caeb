use std::sync::Arc;

use futures::future::join_all;
use log::{debug, warn};

use crate::domain::email::Email;
use crate::error::InboxError;
use crate::mail::decoders::decode_message;
use crate::mail::provider::{DecodeMode, MailProvider};

/// Upper bound on ids requested per list call and emails returned per page.
pub const PAGE_SIZE: usize = 5;

pub struct InboxFetcher {
    provider: Arc<dyn MailProvider>,
    page_size: usize,
}

impl InboxFetcher {
    pub fn new(provider: Arc<dyn MailProvider>) -> Self {
        Self::with_page_size(provider, PAGE_SIZE)
    }

    /// Page size is clamped to `1..=PAGE_SIZE`.
    pub fn with_page_size(provider: Arc<dyn MailProvider>, page_size: usize) -> Self {
        Self {
            provider,
            page_size: page_size.clamp(1, PAGE_SIZE),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch one page (1-based) of decoded emails.
    ///
    /// Pages past the end of the mailbox come back empty. A failure to list
    /// ids is returned as an error; a failure to fetch one message only drops
    /// that message.
    pub async fn fetch(
        &self,
        access_token: &str,
        page: u32,
        mode: DecodeMode,
    ) -> Result<Vec<Email>, InboxError> {
        let page = page.max(1);
        let mut page_token: Option<String> = None;

        // Gmail pages with opaque tokens; walk the chain up to the requested page.
        for _ in 1..page {
            let listed = self
                .provider
                .list_messages(access_token, self.page_size, page_token.as_deref())
                .await
                .map_err(InboxError::list_failed)?;
            match listed.next_page_token {
                Some(next) => page_token = Some(next),
                None => {
                    debug!("page {page} is past the end of the mailbox");
                    return Ok(vec![]);
                }
            }
        }

        let listed = self
            .provider
            .list_messages(access_token, self.page_size, page_token.as_deref())
            .await
            .map_err(InboxError::list_failed)?;

        let ids: Vec<String> = listed
            .messages
            .into_iter()
            .take(self.page_size)
            .map(|m| m.id)
            .collect();

        let emails = self.fetch_ids(access_token, &ids, mode).await;
        if emails.is_empty() && !ids.is_empty() {
            warn!(
                "page {page}: all {} message fetches failed (partial failure)",
                ids.len()
            );
        }
        Ok(emails)
    }

    /// Fetch and decode the given ids concurrently. Output follows the order
    /// of `ids`; ids whose fetch fails are left out.
    pub async fn fetch_ids(&self, access_token: &str, ids: &[String], mode: DecodeMode) -> Vec<Email> {
        let fetches = ids.iter().map(|id| async move {
            self.provider
                .get_message(access_token, id, mode)
                .await
                .map_err(|source| InboxError::ProviderGetFailed {
                    id: id.clone(),
                    source,
                })
        });

        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|res| match res {
                Ok(raw) => Some(decode_message(&raw, mode)),
                Err(e) => {
                    warn!("{e}");
                    None
                }
            })
            .collect()
    }
}
