use crate::config::CrawlConfig;
use crate::scraper::{FetchResult, Fetcher, HttpTransport, ScraperError, TransportError};
use crate::tests::utils::{ok, ScriptedTransport};
use std::time::Duration;

const URL: &str = "http://www.seloger.com/list.htm?idtt=2";

#[test]
fn retries_once_after_transport_failure() {
    let transport = ScriptedTransport::new(vec![
        Err(TransportError("connection reset".into())),
        Ok(ok(URL, "<html></html>".into())),
    ]);
    let fetcher = Fetcher::new(&transport);

    let result = fetcher.fetch(URL).expect("second attempt succeeds");

    assert_eq!(result.body, "<html></html>");
    assert_eq!(*transport.calls.borrow(), 2);
}

#[test]
fn second_transport_failure_is_surfaced() {
    let transport = ScriptedTransport::new(vec![
        Err(TransportError("timed out".into())),
        Err(TransportError("dns error".into())),
    ]);
    let fetcher = Fetcher::new(&transport);

    let err = fetcher.fetch(URL).unwrap_err();

    match err {
        ScraperError::Fetch { url, message } => {
            assert_eq!(url, URL);
            assert_eq!(message, "dns error");
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
    assert_eq!(*transport.calls.borrow(), 2);
}

#[test]
fn http_error_status_is_not_retried() {
    let transport = ScriptedTransport::new(vec![Ok(FetchResult {
        url: URL.to_string(),
        status: 503,
        body: "busy".into(),
    })]);
    let fetcher = Fetcher::new(&transport);

    let result = fetcher.fetch(URL).expect("responses pass through");

    assert_eq!(result.status, 503);
    assert!(!result.is_success());
    assert_eq!(*transport.calls.borrow(), 1);
}

#[test]
fn first_success_makes_a_single_request() {
    let transport = ScriptedTransport::new(vec![Ok(ok(URL, "page".into()))]);
    let fetcher = Fetcher::new(&transport);

    assert!(fetcher.fetch(URL).is_ok());
    assert_eq!(*transport.calls.borrow(), 1);
}

#[test]
fn unreachable_host_fails_after_retry() {
    let config = CrawlConfig::default().with_timeout(Duration::from_secs(2));
    let fetcher = Fetcher::new(HttpTransport::new(&config).expect("client"));

    // nothing listens on port 1
    let err = fetcher.fetch("http://127.0.0.1:1/list.htm").unwrap_err();

    assert!(matches!(err, ScraperError::Fetch { .. }), "{err:?}");
}
