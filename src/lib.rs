//! Paginated inbox browsing and AI digests over the Gmail API.

pub mod auth;
pub mod config;
pub mod digest;
pub mod domain;
pub mod error;
pub mod feed;
pub mod mail;
pub mod server;
pub mod terminal;
