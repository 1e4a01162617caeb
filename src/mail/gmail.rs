//! Gmail REST implementation of [`MailProvider`].

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ProviderError, check_status};
use crate::mail::provider::{DecodeMode, METADATA_HEADERS, MailProvider, MessageList, RawMessage};

pub const DEFAULT_GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

#[derive(Debug, Clone)]
pub struct GmailProvider {
    client: Client,
    base: String,
}

impl GmailProvider {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        Url::parse(&format!("{}/{}", self.base, path))
            .map_err(|e| ProviderError::InvalidResponse(format!("bad gmail url: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        access_token: &str,
    ) -> Result<T, ProviderError> {
        debug!("GET {}", url.path());
        let resp = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .header("accept", "application/json")
            .send()
            .await?;
        let resp = check_status(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

impl Default for GmailProvider {
    fn default() -> Self {
        Self::new(DEFAULT_GMAIL_API_BASE)
    }
}

#[async_trait]
impl MailProvider for GmailProvider {
    async fn list_messages(
        &self,
        access_token: &str,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<MessageList, ProviderError> {
        let mut url = self.endpoint("messages")?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("maxResults", &max_results.to_string());
            if let Some(token) = page_token {
                q.append_pair("pageToken", token);
            }
        }
        self.get_json(url, access_token).await
    }

    async fn get_message(
        &self,
        access_token: &str,
        id: &str,
        mode: DecodeMode,
    ) -> Result<RawMessage, ProviderError> {
        let mut url = self.endpoint(&format!("messages/{id}"))?;
        {
            let mut q = url.query_pairs_mut();
            match mode {
                DecodeMode::Metadata => {
                    q.append_pair("format", "metadata");
                    for h in METADATA_HEADERS {
                        q.append_pair("metadataHeaders", h);
                    }
                }
                DecodeMode::Full => {
                    q.append_pair("format", "full");
                }
            }
        }
        self.get_json(url, access_token).await
    }
}
