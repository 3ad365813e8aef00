// Tests for crawl functionality

use flowmap_core::FlowError;
use flowmap_core::crawl::CrawlProgressCallback;
use flowmap_core::crawl::{
    CrawlOptions, CrawlRequest, CrawlResponse, DEFAULT_MAX_DEPTH, execute_crawl,
    extract_url_path, map_site,
};
use flowmap_scanner::{CrawlResult, FetchFailure, Page};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn page(url: &str, links: &[&str]) -> Page {
    Page::new(
        url.to_string(),
        url.to_string(),
        links.iter().map(|l| l.to_string()).collect(),
    )
}

async fn mount_html(server: &MockServer, at: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

fn options(uri: &str) -> CrawlOptions {
    let mut options = CrawlOptions::new(CrawlRequest::new(uri));
    options.timeout = Duration::from_secs(2);
    options
}

// ============================================================================
// Request Tests
// ============================================================================

#[test]
fn test_request_defaults_max_depth() {
    let request = CrawlRequest::from_json(r#"{"startUrl": "https://example.com"}"#).unwrap();
    assert_eq!(request.start_url().unwrap(), "https://example.com");
    assert_eq!(request.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn test_request_with_explicit_depth() {
    let request =
        CrawlRequest::from_json(r#"{"startUrl": "https://example.com", "maxDepth": 0}"#).unwrap();
    assert_eq!(request.max_depth, 0);
}

#[test]
fn test_request_without_start_url_is_invalid() {
    let request = CrawlRequest::from_json("{}").unwrap();
    assert!(matches!(request.start_url(), Err(FlowError::InvalidInput(_))));

    let blank = CrawlRequest::new("   ");
    assert!(matches!(blank.start_url(), Err(FlowError::InvalidInput(_))));
}

#[test]
fn test_malformed_request_is_invalid() {
    let err = CrawlRequest::from_json("not json").unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_response_serializes_camel_case() {
    let response = CrawlResponse {
        nodes: Vec::new(),
        edges: Vec::new(),
        crawled_count: 0,
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["crawledCount"], 0);
    assert!(json["nodes"].as_array().unwrap().is_empty());
}

// ============================================================================
// Options Tests
// ============================================================================

#[test]
fn test_default_options_are_valid() {
    assert!(options("https://example.com").validate().is_ok());
}

#[test]
fn test_threshold_out_of_range_is_invalid() {
    for threshold in [-0.1, 1.5, f64::NAN] {
        let mut opts = options("https://example.com");
        opts.threshold = threshold;
        assert!(opts.validate().unwrap_err().is_invalid_input());
    }
}

#[test]
fn test_zero_max_pages_is_invalid() {
    let mut opts = options("https://example.com");
    opts.max_pages = 0;
    assert!(opts.validate().unwrap_err().is_invalid_input());
}

// ============================================================================
// Mapping Tests
// ============================================================================

#[test]
fn test_map_site_counts_and_filters() {
    let seed = "https://site.test/";
    let result = CrawlResult {
        pages: vec![
            page(seed, &["https://site.test/a", "https://site.test/b"]),
            page("https://site.test/a", &[seed]),
            page("https://site.test/b", &[seed]),
        ],
        failures: vec![FetchFailure {
            url: "https://site.test/c".to_string(),
            reason: "Unexpected status code: 500".to_string(),
        }],
        ..Default::default()
    };

    let outcome = map_site(&result, 0.5);

    assert_eq!(outcome.response.crawled_count, 3);
    assert_eq!(outcome.response.nodes.len(), 3);
    assert_eq!(outcome.response.edges.len(), 2);
    assert_eq!(outcome.boilerplate, vec![seed.to_string()]);
    assert_eq!(outcome.failures.len(), 1);
}

#[test]
fn test_map_site_of_empty_crawl() {
    let outcome = map_site(&CrawlResult::default(), 0.3);
    assert!(outcome.response.is_empty());
    assert_eq!(outcome.response.crawled_count, 0);
}

// ============================================================================
// End-to-end Tests
// ============================================================================

#[tokio::test]
async fn test_crawl_of_linkless_seed() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "<html><title>Lonely</title></html>".to_string()).await;

    let outcome = execute_crawl(options(&server.uri()), None).await.unwrap();

    assert_eq!(outcome.response.crawled_count, 1);
    assert_eq!(outcome.response.nodes.len(), 1);
    assert_eq!(outcome.response.nodes[0].label, "Lonely");
    assert!(outcome.response.edges.is_empty());
}

#[tokio::test]
async fn test_progress_callback_reports_each_fetch() {
    let server = MockServer::start().await;
    let uri = server.uri();
    mount_html(&server, "/", format!(r#"<a href="{}/next">next</a>"#, uri)).await;
    mount_html(&server, "/next", "<html><title>Next</title></html>".to_string()).await;

    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = messages.clone();
    let callback: CrawlProgressCallback = Arc::new(move |message: String| {
        sink.lock().unwrap().push(message);
    });

    execute_crawl(options(&uri), Some(callback)).await.unwrap();

    assert_eq!(
        *messages.lock().unwrap(),
        vec![
            format!("Crawling {}/", uri),
            format!("Crawling {}/next", uri),
        ]
    );
}

#[tokio::test]
async fn test_failed_page_is_absent_from_graph() {
    let server = MockServer::start().await;
    let uri = server.uri();
    mount_html(
        &server,
        "/",
        format!(r#"<a href="{0}/ok">ok</a><a href="{0}/broken">broken</a>"#, uri),
    )
    .await;
    mount_html(&server, "/ok", "<html><title>Ok</title></html>".to_string()).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut opts = options(&uri);
    opts.threshold = 1.0;
    let outcome = execute_crawl(opts, None).await.unwrap();

    let broken = format!("{}/broken", uri);
    assert_eq!(outcome.response.crawled_count, 2);
    assert!(outcome.response.nodes.iter().all(|n| n.id != broken));
    assert!(outcome.response.edges.iter().all(|e| e.target != broken));
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].url, broken);
}

#[tokio::test]
async fn test_depth_zero_maps_only_seed() {
    let server = MockServer::start().await;
    let uri = server.uri();
    mount_html(
        &server,
        "/",
        format!(r#"<a href="{0}/a">a</a><a href="{0}/b">b</a>"#, uri),
    )
    .await;
    mount_html(&server, "/a", "<html></html>".to_string()).await;
    mount_html(&server, "/b", "<html></html>".to_string()).await;

    let mut opts = options(&uri);
    opts.request = CrawlRequest::new(uri.clone()).with_max_depth(0);
    let outcome = execute_crawl(opts, None).await.unwrap();

    assert_eq!(outcome.response.crawled_count, 1);
    assert!(outcome.response.edges.is_empty());
}

#[tokio::test]
async fn test_unreachable_seed_is_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = execute_crawl(options(&server.uri()), None).await.unwrap_err();
    assert!(matches!(err, FlowError::EmptyResult { .. }));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_missing_start_url_never_crawls() {
    let request = CrawlRequest::from_json(r#"{"maxDepth": 1}"#).unwrap();
    let err = execute_crawl(CrawlOptions::new(request), None)
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_unparseable_start_url_is_invalid_input() {
    let err = execute_crawl(options("definitely not a url"), None)
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
}

// ============================================================================
// URL Path Extraction Tests
// ============================================================================

#[test]
fn test_extract_url_path_root() {
    assert_eq!(extract_url_path("http://example.com/"), "/");
    assert_eq!(extract_url_path("http://example.com"), "/");
}

#[test]
fn test_extract_url_path_nested() {
    assert_eq!(
        extract_url_path("http://example.com/docs/guide/intro"),
        "/docs/guide/intro"
    );
}

#[test]
fn test_extract_url_path_drops_query_and_fragment() {
    assert_eq!(extract_url_path("http://example.com/pricing?plan=pro#faq"), "/pricing");
}

#[test]
fn test_extract_url_path_invalid_url() {
    let url = "not a valid url";
    assert_eq!(extract_url_path(url), url);
}
