//! JSON bodies exchanged between the inbox server and its clients.

use serde::{Deserialize, Serialize};

use crate::domain::email::Email;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailsResponse {
    pub emails: Vec<Email>,
}

/// `emails` absent means "summarize your own recent window".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<Email>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
