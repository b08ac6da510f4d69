use std::time::Duration;

use scout_core::ErrorCode;
use scout_engine::{FailureKind, FetchSettings, PageFetcher, ReqwestPageFetcher};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetcher_returns_html_with_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .and(header("user-agent", "scout-test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestPageFetcher::new(FetchSettings::default());
    let url = format!("{}/doc", server.uri());

    let output = fetcher.fetch(&url, "scout-test").await.expect("fetch ok");
    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, output.metadata.original_url);
    assert_eq!(output.metadata.redirect_count, 0);
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(output.bytes, b"<html>ok</html>");
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestPageFetcher::new(FetchSettings::default());
    let url = format!("{}/missing", server.uri());

    let err = fetcher.fetch(&url, "scout-test").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.error_code(), ErrorCode::Io);
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw("slow", "text/html"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestPageFetcher::new(settings);
    let url = format!("{}/slow", server.uri());

    let err = fetcher.fetch(&url, "scout-test").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("01234567890", "text/html"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestPageFetcher::new(settings);
    let url = format!("{}/large", server.uri());

    let err = fetcher.fetch(&url, "scout-test").await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn empty_body_maps_to_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestPageFetcher::new(FetchSettings::default());
    let err = fetcher
        .fetch(&format!("{}/empty", server.uri()), "scout-test")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::EmptyBody);
    assert_eq!(err.error_code(), ErrorCode::EmptyResponse);
}

#[tokio::test]
async fn non_html_page_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestPageFetcher::new(FetchSettings::default());
    let err = fetcher
        .fetch(&format!("{}/data", server.uri()), "scout-test")
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "application/json".into()
        }
    );
}

#[tokio::test]
async fn invalid_url_is_reported() {
    let fetcher = ReqwestPageFetcher::new(FetchSettings::default());
    let err = fetcher.fetch("not a url", "scout-test").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
