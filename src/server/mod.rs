//! HTTP surface of the inbox pipeline.
//!
//! - `GET /mails?page=n` returns one page of list-mode emails.
//! - `POST /summarize-emails` returns a digest of the posted emails, or of
//!   the most recent page when no emails are posted.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, info};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::digest::summarizer::Summarizer;
use crate::domain::wire::ErrorBody;
use crate::error::InboxError;
use crate::mail::fetcher::InboxFetcher;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<InboxFetcher>,
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    pub fn new(fetcher: InboxFetcher, summarizer: Summarizer) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            summarizer: Arc::new(summarizer),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Inbox(#[from] InboxError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::Inbox(InboxError::Unauthorized) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Inbox(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {self}");
        }
        let body = ErrorBody {
            error: match status {
                StatusCode::UNAUTHORIZED => "Unauthorized".to_string(),
                _ => self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    handlers::routes().with_state(state)
}

/// Bind `listen_addr` and serve until the process is stopped.
pub async fn serve(listen_addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(listen_addr).await?;
    info!("inbox server listening on {}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
