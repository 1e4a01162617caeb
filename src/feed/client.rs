//! HTTP client for the inbox server, used by the feed host.

use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use thiserror::Error;
use url::Url;

use crate::domain::email::Email;
use crate::domain::wire::{ErrorBody, MailsResponse, SummarizeRequest, SummarizeResponse};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("not signed in or session expired")]
    Unauthorized,

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid server url: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone)]
pub struct InboxClient {
    client: Client,
    base: Url,
    access_token: Option<String>,
}

impl InboxClient {
    pub fn new(server_url: &str, access_token: Option<String>) -> Result<Self, ClientError> {
        let mut base = Url::parse(server_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            base,
            access_token,
        })
    }

    pub fn has_session(&self) -> bool {
        self.access_token.is_some()
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// `GET /mails?page=n`
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Email>, ClientError> {
        let mut url = self.base.join("mails")?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        debug!("fetching page {page}");

        let resp = self.authorized(self.client.get(url)).send().await?;
        let body: MailsResponse = ok_or_error(resp).await?.json().await?;
        Ok(body.emails)
    }

    /// `POST /summarize-emails` with the given emails.
    pub async fn summarize(&self, emails: &[Email]) -> Result<String, ClientError> {
        let url = self.base.join("summarize-emails")?;
        let req = SummarizeRequest {
            emails: Some(emails.to_vec()),
        };

        let resp = self
            .authorized(self.client.post(url))
            .json(&req)
            .send()
            .await?;
        let body: SummarizeResponse = ok_or_error(resp).await?.json().await?;
        Ok(body.summary)
    }
}

async fn ok_or_error(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status.as_u16() == 401 {
        return Err(ClientError::Unauthorized);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
