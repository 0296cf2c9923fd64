//! The HTTP endpoint, exercised over a real socket.

mod helpers;

use helpers::{create_test_pool, MIXED_PAGE};
use schema_audit::server::{router, AppState};
use schema_audit::{FetchError, Fetcher, PipelineOptions, SchemaStore, StaticMarkup};
use serde_json::{json, Value};

async fn spawn<F: Fetcher + 'static>(state: AppState<F>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

async fn post_detect(base: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/api/schema-detection"))
        .json(&body)
        .send()
        .await
        .expect("Request failed");
    let status = response.status().as_u16();
    let text = response.text().await.unwrap();
    (status, serde_json::from_str(&text).unwrap())
}

struct Unreachable;

impl Fetcher for Unreachable {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        Err(FetchError::Timeout {
            url: url.to_string(),
            secs: 12,
        })
    }
}

#[tokio::test]
async fn test_health() {
    let base = spawn(AppState::new(StaticMarkup::new(""), PipelineOptions::default(), None)).await;
    let body = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_detect_returns_report() {
    let base = spawn(AppState::new(
        StaticMarkup::new(MIXED_PAGE),
        PipelineOptions::default(),
        None,
    ))
    .await;

    let (status, body) = post_detect(&base, json!({"url": "acme.test"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["url"], "https://acme.test");
    assert_eq!(body["message"], "Structured data detected");
    assert_eq!(body["logo"], "https://acme.test/logo.png");
    assert_eq!(body["schemas"]["summary"].as_array().unwrap().len(), 4);
    assert_eq!(body["schemas"]["details"]["Product"][0]["isValid"], false);
}

#[tokio::test]
async fn test_fetch_failure_still_200() {
    let base = spawn(AppState::new(Unreachable, PipelineOptions::default(), None)).await;
    let (status, body) = post_detect(&base, json!({"url": "https://down.test/"})).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "url": "https://down.test/",
            "message": "Error occurred during schema detection",
            "logo": null,
            "schemas": {"summary": [], "details": {}}
        })
    );
}

#[tokio::test]
async fn test_invalid_url_is_error_report() {
    let base = spawn(AppState::new(
        StaticMarkup::new(MIXED_PAGE),
        PipelineOptions::default(),
        None,
    ))
    .await;
    let (status, body) = post_detect(&base, json!({"url": "not a url !!"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Error occurred during schema detection");
}

#[tokio::test]
async fn test_site_id_persists_report() {
    let store = SchemaStore::from_pool(create_test_pool().await);
    let base = spawn(AppState::new(
        StaticMarkup::new(MIXED_PAGE),
        PipelineOptions::default(),
        Some(store.clone()),
    ))
    .await;

    let (_, body) = post_detect(&base, json!({"url": "https://acme.test/", "siteId": "site-7"})).await;
    let stored = store.fetch_report("site-7").await.unwrap().unwrap();
    assert_eq!(stored.report_value().unwrap(), body);
    assert_eq!(stored.logo.as_deref(), Some("https://acme.test/logo.png"));

    // No siteId, nothing stored
    post_detect(&base, json!({"url": "https://other.test/"})).await;
    assert!(store.fetch_report("https://other.test/").await.unwrap().is_none());
}

#[tokio::test]
async fn test_storage_failure_does_not_change_response() {
    let store = SchemaStore::from_pool(create_test_pool().await);
    store.pool().close().await;
    let base = spawn(AppState::new(
        StaticMarkup::new(MIXED_PAGE),
        PipelineOptions::default(),
        Some(store),
    ))
    .await;

    let (status, body) = post_detect(&base, json!({"url": "https://acme.test/", "siteId": "x"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Structured data detected");
}
