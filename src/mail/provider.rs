//! Mail provider seam and the raw record shapes it returns.
//!
//! The shapes mirror the Gmail `users.messages` resources. Every field is
//! optional so a sparse record still deserializes; the decoder decides what
//! an absent field means.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::email::Header;
use crate::error::ProviderError;

/// Which representation of a message to fetch and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Id, snippet, date and the `Subject`/`From` headers only.
    Metadata,
    /// Everything, including the decoded body text.
    Full,
}

/// Headers requested in metadata mode.
pub const METADATA_HEADERS: &[&str] = &["Subject", "From"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageList {
    #[serde(default)]
    pub messages: Vec<MessageRef>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartBody {
    pub data: Option<String>,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    pub mime_type: Option<String>,
    pub headers: Option<Vec<Header>>,
    pub body: Option<PartBody>,
    pub parts: Option<Vec<MessagePart>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    pub id: String,
    pub snippet: Option<String>,
    pub internal_date: Option<String>,
    pub payload: Option<MessagePart>,
}

#[async_trait]
pub trait MailProvider: Send + Sync {
    /// List at most `max_results` message ids, starting at `page_token`.
    async fn list_messages(
        &self,
        access_token: &str,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<MessageList, ProviderError>;

    async fn get_message(
        &self,
        access_token: &str,
        id: &str,
        mode: DecodeMode,
    ) -> Result<RawMessage, ProviderError>;
}
