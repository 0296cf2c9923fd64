//! Fetching through a mock HTTP server.
//!
//! These tests verify that real HTTP responses flow through the pipeline and
//! that every failure mode ends in the detection-error report.

mod helpers;

use std::time::Duration;

use helpers::MIXED_PAGE;
use schema_audit::{
    detect_many, detect_schemas, FetchConfig, FetchError, Fetcher, HttpFetcher, PipelineOptions,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_with_timeout(secs: u64) -> HttpFetcher {
    HttpFetcher::from_config(&FetchConfig {
        timeout: Duration::from_secs(secs),
        user_agent: "schema_audit_test/1.0".to_string(),
    })
    .expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_fetch_success_runs_pipeline() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "schema_audit_test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MIXED_PAGE))
        .mount(&mock_server)
        .await;

    let url = format!("{}/", mock_server.uri());
    let report = detect_schemas(&fetcher_with_timeout(5), &url, &PipelineOptions::default()).await;

    assert_eq!(report.message, "Structured data detected");
    assert_eq!(report.url, url);
    assert_eq!(report.schemas.summary.len(), 4);
}

#[tokio::test]
async fn test_non_success_status_is_fetch_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(MIXED_PAGE))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let fetcher = fetcher_with_timeout(5);

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));

    let report = detect_schemas(&fetcher, &url, &PipelineOptions::default()).await;
    assert!(report.is_detection_error());
    assert!(report.schemas.summary.is_empty());
    assert_eq!(report.logo, Some(None));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(MIXED_PAGE)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/", mock_server.uri());
    let report = detect_schemas(&fetcher_with_timeout(1), &url, &PipelineOptions::default()).await;
    assert_eq!(report.message, "Error occurred during schema detection");
}

#[tokio::test]
async fn test_unreachable_host_is_error_report() {
    // Bind then drop a listener so the port is closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let url = format!("http://127.0.0.1:{port}/");
    let report = detect_schemas(&fetcher_with_timeout(2), &url, &PipelineOptions::default()).await;
    assert!(report.is_detection_error());
}

#[tokio::test]
async fn test_detect_many_preserves_input_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(MIXED_PAGE)
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = ["/slow", "/empty", "/broken"]
        .iter()
        .map(|p| format!("{}{}", mock_server.uri(), p))
        .collect();
    let reports = detect_many(&fetcher_with_timeout(5), &urls, &PipelineOptions::default(), 3).await;

    let messages: Vec<&str> = reports.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Structured data detected",
            "No structured data detected",
            "Error occurred during schema detection"
        ]
    );
    let returned: Vec<&str> = reports.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(returned, urls.iter().map(String::as_str).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_relative_microdata_urls_resolve_against_page() {
    let mock_server = MockServer::start().await;
    let page = r#"<div itemscope itemtype="https://schema.org/Organization">
        <span itemprop="name">Acme</span>
        <img itemprop="logo" src="/img/logo.png">
    </div>"#;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&mock_server)
        .await;

    let url = format!("{}/about/", mock_server.uri());
    let report = detect_schemas(&fetcher_with_timeout(5), &url, &PipelineOptions::default()).await;
    assert_eq!(
        report.logo_url(),
        Some(format!("{}/img/logo.png", mock_server.uri()).as_str())
    );
}
