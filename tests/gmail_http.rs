//! Gmail client and inbox fetcher against a mock Gmail API.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inbox_digest::error::{InboxError, ProviderError};
use inbox_digest::mail::fetcher::InboxFetcher;
use inbox_digest::mail::gmail::GmailProvider;
use inbox_digest::mail::provider::{DecodeMode, MailProvider};

const BASE: &str = "/gmail/v1/users/me";

fn provider(server: &MockServer) -> GmailProvider {
    GmailProvider::new(format!("{}{BASE}", server.uri()))
}

fn message(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "snippet": format!("about {id}"),
        "internalDate": "1709647620000",
        "payload": {
            "mimeType": "text/plain",
            "headers": [
                { "name": "From", "value": "Ana <ana@example.com>" },
                { "name": "Subject", "value": format!("Subject {id}") },
                { "name": "To", "value": "me@example.com" }
            ],
            "body": { "size": 5, "data": "aGVsbG8" }
        }
    })
}

async fn mount_list(server: &MockServer, ids: &[&str]) {
    let messages: Vec<_> = ids.iter().map(|id| json!({ "id": id, "threadId": id })).collect();
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/messages")))
        .and(query_param("maxResults", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": messages,
            "resultSizeEstimate": ids.len()
        })))
        .mount(server)
        .await;
}

async fn mount_message(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/messages/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(message(id)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_sends_bearer_and_page_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/messages")))
        .and(header("authorization", "Bearer ya29.test"))
        .and(query_param("maxResults", "5"))
        .and(query_param("pageToken", "next-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{ "id": "x" }],
            "nextPageToken": "next-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let listed = provider(&server)
        .list_messages("ya29.test", 5, Some("next-1"))
        .await
        .unwrap();
    assert_eq!(listed.messages.len(), 1);
    assert_eq!(listed.next_page_token.as_deref(), Some("next-2"));
}

#[tokio::test]
async fn metadata_fetch_requests_subject_and_from() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/messages/m1")))
        .and(query_param("format", "metadata"))
        .and(query_param("metadataHeaders", "Subject"))
        .and(query_param("metadataHeaders", "From"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message("m1")))
        .expect(1)
        .mount(&server)
        .await;

    let raw = provider(&server)
        .get_message("tok", "m1", DecodeMode::Metadata)
        .await
        .unwrap();
    assert_eq!(raw.id, "m1");
    assert_eq!(raw.internal_date.as_deref(), Some("1709647620000"));
}

#[tokio::test]
async fn rejected_credential_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/messages")))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .list_messages("stale", 5, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Unauthorized(_)));

    let fetcher = InboxFetcher::new(Arc::new(provider(&server)));
    let err = fetcher.fetch("stale", 1, DecodeMode::Metadata).await.unwrap_err();
    assert!(matches!(err, InboxError::Unauthorized));
}

#[tokio::test]
async fn page_with_one_missing_message_keeps_the_rest_in_order() {
    let server = MockServer::start().await;
    mount_list(&server, &["a", "b", "c", "d", "e"]).await;
    for id in ["a", "b", "d", "e"] {
        mount_message(&server, id).await;
    }
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/messages/c")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = InboxFetcher::new(Arc::new(provider(&server)));
    let page = fetcher.fetch("tok", 1, DecodeMode::Metadata).await.unwrap();

    let ids: Vec<&str> = page.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "d", "e"]);
    assert_eq!(page[0].headers.len(), 2);
    assert_eq!(page[0].from(), Some("Ana <ana@example.com>"));
    assert_eq!(page[0].body_text, None);
}

#[tokio::test]
async fn full_mode_decodes_body() {
    let server = MockServer::start().await;
    mount_list(&server, &["a"]).await;
    mount_message(&server, "a").await;

    let fetcher = InboxFetcher::new(Arc::new(provider(&server)));
    let page = fetcher.fetch("tok", 1, DecodeMode::Full).await.unwrap();
    assert_eq!(page[0].body_text.as_deref(), Some("hello"));
}

#[tokio::test]
async fn page_past_the_token_chain_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/messages")))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{ "id": "a" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = InboxFetcher::new(Arc::new(provider(&server)));
    let page = fetcher.fetch("tok", 2, DecodeMode::Metadata).await.unwrap();
    assert!(page.is_empty());
}
