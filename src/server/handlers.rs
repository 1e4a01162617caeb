use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, info};
use serde::Deserialize;

use super::auth::AccessToken;
use super::{ApiError, AppState};
use crate::digest::summarizer::MAX_SUMMARY_EMAILS;
use crate::domain::email::Email;
use crate::domain::wire::{MailsResponse, SummarizeRequest, SummarizeResponse};
use crate::mail::provider::DecodeMode;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/mails", get(list_mails))
        .route("/summarize-emails", post(summarize_emails))
        .route("/health", get(health_check))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u32>,
}

async fn list_mails(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<MailsResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(format!("invalid page: {e}")))?;
    let page = query.page.unwrap_or(1);
    if page == 0 {
        return Err(ApiError::BadRequest("page must be >= 1".into()));
    }

    let emails = state
        .fetcher
        .fetch(&token, page, DecodeMode::Metadata)
        .await?;
    info!("GET /mails page={page} -> {} emails", emails.len());
    Ok(Json(MailsResponse { emails }))
}

async fn summarize_emails(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    body: Bytes,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let request: SummarizeRequest = if body.is_empty() {
        SummarizeRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))?
    };

    let emails = match request.emails {
        Some(mut posted) => {
            posted.truncate(MAX_SUMMARY_EMAILS);
            hydrate_bodies(&state, &token, posted).await
        }
        None => {
            debug!("no emails posted; summarizing the most recent page");
            state.fetcher.fetch(&token, 1, DecodeMode::Full).await?
        }
    };

    let summary = state.summarizer.summarize(&emails).await?;
    info!("POST /summarize-emails -> {} emails summarized", emails.len());
    Ok(Json(SummarizeResponse { summary }))
}

/// Fill in `bodyText` for posted emails that arrived without it. An email
/// whose full fetch fails is kept as posted.
async fn hydrate_bodies(state: &AppState, token: &str, mut emails: Vec<Email>) -> Vec<Email> {
    let missing: Vec<String> = emails
        .iter()
        .filter(|e| e.body_text.is_none())
        .map(|e| e.id.clone())
        .collect();
    if missing.is_empty() {
        return emails;
    }

    let fetched = state
        .fetcher
        .fetch_ids(token, &missing, DecodeMode::Full)
        .await;
    for full in fetched {
        if let Some(slot) = emails.iter_mut().find(|e| e.id == full.id) {
            *slot = full;
        }
    }
    emails
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
