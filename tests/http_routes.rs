//! Quote HTTP Route Tests
//!
//! Drives the router in-process and checks status codes and bodies:
//! - create returns 201 with the assigned id
//! - list returns 204 on an empty store, filters by author
//! - random returns 404 on an empty store
//! - delete returns 204, 404 for unknown ids, 400 for malformed ids

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use quotes::http_server::{HttpServer, HttpServerConfig};
use quotes::observability::{LogBuffer, Logger};
use quotes::quote::Quote;
use quotes::service::QuoteService;
use quotes::store::QuoteStore;

// =============================================================================
// Helper Functions
// =============================================================================

fn service_with_logs() -> (QuoteService, LogBuffer) {
    let buffer = LogBuffer::new();
    let logger = Arc::new(Logger::with_writer(buffer.clone()));
    let store = Arc::new(QuoteStore::in_memory(logger.clone()));
    (QuoteService::new(store, logger), buffer)
}

fn router(service: QuoteService) -> Router {
    HttpServer::build_router(&HttpServerConfig::default(), service)
}

fn seeded() -> QuoteService {
    let (service, _) = service_with_logs();
    for (text, author) in [
        ("Quote 1", "Author 1"),
        ("Quote 2", "Author 2"),
        ("Quote 3", "Author 1"),
    ] {
        service.add(Quote::new(text, author)).unwrap();
    }
    service
}

async fn send(
    router: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

// =============================================================================
// Create Tests
// =============================================================================

/// POST /quotes stores the quote and returns it with its id.
#[tokio::test]
async fn test_create_quote() {
    let (service, buffer) = service_with_logs();
    let (status, body) = send(
        router(service.clone()),
        Method::POST,
        "/quotes",
        Some(json!({"quote": "Simple quote", "author": "Simple author"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        json_body(&body),
        json!({"quote": "Simple quote", "author": "Simple author", "id": 1})
    );
    assert_eq!(service.store().len().unwrap(), 1);
    assert!(buffer.contents().contains("QUOTE_ADDED"));
}

/// A body that is not a quote is a 400 and nothing is stored.
#[tokio::test]
async fn test_create_malformed_body() {
    let (service, buffer) = service_with_logs();
    let (status, body) = send(
        router(service.clone()),
        Method::POST,
        "/quotes",
        Some(json!({"author": "no text"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["code"], 400);
    assert!(service.store().is_empty().unwrap());
    assert!(buffer.contents().contains("QUOTE_REQUEST_REJECTED"));
}

/// Blank text is rejected before it reaches the store.
#[tokio::test]
async fn test_create_blank_text() {
    let (service, _) = service_with_logs();
    let (status, _) = send(
        router(service.clone()),
        Method::POST,
        "/quotes",
        Some(json!({"quote": "  ", "author": "A"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(service.store().is_empty().unwrap());
}

// =============================================================================
// List Tests
// =============================================================================

/// GET /quotes on an empty store is 204 No Content.
#[tokio::test]
async fn test_list_empty_store() {
    let (service, _) = service_with_logs();
    let (status, body) = send(router(service), Method::GET, "/quotes", None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

/// GET /quotes lists everything in insertion order.
#[tokio::test]
async fn test_list_all() {
    let (status, body) = send(router(seeded()), Method::GET, "/quotes", None).await;

    assert_eq!(status, StatusCode::OK);
    let quotes = json_body(&body);
    let texts: Vec<&str> = quotes
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["quote"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["Quote 1", "Quote 2", "Quote 3"]);
}

/// GET /quotes?author= keeps exact matches only.
#[tokio::test]
async fn test_list_by_author() {
    let (status, body) = send(router(seeded()), Method::GET, "/quotes?author=Author+1", None).await;

    assert_eq!(status, StatusCode::OK);
    let quotes = json_body(&body);
    let quotes = quotes.as_array().unwrap();
    assert_eq!(quotes.len(), 2);
    assert!(quotes.iter().all(|q| q["author"] == "Author 1"));
}

/// A filter that matches nothing is an empty 200, not 204.
#[tokio::test]
async fn test_list_unknown_author() {
    let (status, body) = send(router(seeded()), Method::GET, "/quotes?author=A", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!([]));
}

// =============================================================================
// Random Tests
// =============================================================================

/// GET /quotes/random returns one of the stored quotes.
#[tokio::test]
async fn test_random_quote() {
    let (status, body) = send(router(seeded()), Method::GET, "/quotes/random", None).await;

    assert_eq!(status, StatusCode::OK);
    let quote = json_body(&body);
    let text = quote["quote"].as_str().unwrap();
    assert!(["Quote 1", "Quote 2", "Quote 3"].contains(&text));
}

/// GET /quotes/random on an empty store is 404.
#[tokio::test]
async fn test_random_empty_store() {
    let (service, _) = service_with_logs();
    let (status, body) = send(router(service), Method::GET, "/quotes/random", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"], "No quotes stored");
}

// =============================================================================
// Delete Tests
// =============================================================================

/// DELETE /quotes/1 removes the quote; repeating it is 404.
#[tokio::test]
async fn test_delete_quote() {
    let service = seeded();

    let (status, _) = send(router(service.clone()), Method::DELETE, "/quotes/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(service.store().len().unwrap(), 2);

    let (status, body) = send(router(service), Method::DELETE, "/quotes/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"], "Quote with id 1 not found");
}

/// DELETE with a non-numeric id is 400.
#[tokio::test]
async fn test_delete_invalid_id() {
    let service = seeded();
    let (status, _) = send(router(service.clone()), Method::DELETE, "/quotes/invalid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(service.store().len().unwrap(), 3);
}
