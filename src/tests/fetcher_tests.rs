use super::utils::{page_html, AdFixture};
use crate::config::{PipelineConfig, DEFAULT_USER_AGENT};
use crate::scraper::{FetchError, HttpFetcher, PageSource};
use mockito::{Matcher, Server};
use std::time::Duration;

fn config_for(server: &Server) -> PipelineConfig {
    PipelineConfig {
        origin: server.url(),
        category_path: "en-in/delhi_g4058659/apartments-flats_c1723".into(),
        timeout: Duration::from_secs(5),
        delay: Duration::ZERO,
        ..Default::default()
    }
}

#[test]
fn fetches_page_with_browser_user_agent() {
    let mut server = Server::new();
    let html = page_html(&[AdFixture::full("Flat", "₹ 10,000")]);
    let m = server
        .mock("GET", "/en-in/delhi_g4058659/apartments-flats_c1723")
        .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(&html)
        .expect(1)
        .create();

    let fetcher = HttpFetcher::new(&config_for(&server)).unwrap();
    let body = fetcher.fetch_page(3).unwrap();

    assert_eq!(body, html);
    m.assert();
}

#[test]
fn error_status_still_returns_body() {
    let mut server = Server::new();
    let m = server
        .mock("GET", "/en-in/delhi_g4058659/apartments-flats_c1723")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("<html><body>Service unavailable</body></html>")
        .create();

    let fetcher = HttpFetcher::new(&config_for(&server)).unwrap();
    let body = fetcher.fetch_page(1).unwrap();

    assert!(body.contains("Service unavailable"));
    m.assert();
}

#[test]
fn connection_failure_is_a_fetch_error() {
    // Nothing listens on port 9 on the test host.
    let config = PipelineConfig {
        origin: "http://127.0.0.1:9".into(),
        timeout: Duration::from_secs(2),
        ..Default::default()
    };
    let fetcher = HttpFetcher::new(&config).unwrap();

    let err = fetcher.fetch_page(1).unwrap_err();
    assert!(matches!(err, FetchError::Network(_) | FetchError::Timeout(_)));
}
