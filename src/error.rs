//! Error types shared by the mail pipeline and the digest service.

use thiserror::Error;

/// Transport-level failure talking to a remote provider (mail or generative).
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the credential (HTTP 401/403).
    #[error("credential rejected: {0}")]
    Unauthorized(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Failures the inbox pipeline surfaces to its callers.
#[derive(Error, Debug)]
pub enum InboxError {
    /// Missing or rejected access credential.
    #[error("unauthorized")]
    Unauthorized,

    /// Listing message ids failed; fatal for the page fetch.
    #[error("listing messages failed: {0}")]
    ProviderListFailed(#[source] ProviderError),

    /// A single message could not be fetched. Absorbed by the fetcher.
    #[error("fetching message {id} failed: {source}")]
    ProviderGetFailed {
        id: String,
        #[source]
        source: ProviderError,
    },

    /// The generative call failed.
    #[error("summarization failed: {0}")]
    SummarizationFailed(#[source] ProviderError),
}

/// Map non-success statuses onto [`ProviderError`].
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    match status.as_u16() {
        401 | 403 => Err(ProviderError::Unauthorized(body)),
        code => Err(ProviderError::Status { status: code, body }),
    }
}

impl InboxError {
    pub fn list_failed(err: ProviderError) -> Self {
        match err {
            ProviderError::Unauthorized(_) => InboxError::Unauthorized,
            other => InboxError::ProviderListFailed(other),
        }
    }
}
