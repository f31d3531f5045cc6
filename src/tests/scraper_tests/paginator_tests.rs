use crate::scraper::paginator::{page_ceiling, read_counter};
use crate::scraper::{ParsedPage, ScraperError, SeLogerScraper, RESULTS_PER_PAGE};
use crate::tests::utils::{blocked_page, config, payload, result_page, search, MockSite, RecordingSleeper};
use serde_json::json;
use std::time::Duration;

fn site_with_pages(nbresults: &str, pages: u32) -> MockSite {
    let search = search();
    let mut site = MockSite::new();
    for index in 1..=pages {
        let first_id = (index - 1) * 20 + 1;
        site = site.page(
            search.page_url(index),
            result_page(&payload(nbresults, index, first_id, 20)),
        );
    }
    site
}

#[test]
fn ceiling_adds_a_page_even_on_exact_multiples() {
    assert_eq!(page_ceiling(20, 100), 2);
    assert_eq!(page_ceiling(40, 100), 3);
    assert_eq!(page_ceiling(0, 100), 1);
    assert_eq!(page_ceiling(19, 100), 1);
    assert_eq!(page_ceiling(1234, 100), 62);
    assert_eq!(page_ceiling(50_000, 100), 100);
    assert_eq!(page_ceiling(45, 2), 2);
}

#[test]
fn counters_drop_thousands_separators() {
    let payload = json!({"nbresults": "1\u{a0}234", "nbpage": 3, "narrow": "12\u{202f}500"});

    assert_eq!(read_counter(&payload, "nbresults").unwrap(), 1234);
    assert_eq!(read_counter(&payload, "nbpage").unwrap(), 3);
    assert_eq!(read_counter(&payload, "narrow").unwrap(), 12500);
}

#[test]
fn bad_counters_are_shape_errors() {
    let payload = json!({"nbresults": "beaucoup"});

    assert!(matches!(
        read_counter(&payload, "nbresults"),
        Err(ScraperError::UnexpectedShape(_))
    ));
    assert!(matches!(
        read_counter(&payload, "nbpage"),
        Err(ScraperError::UnexpectedShape(_))
    ));
}

#[test]
fn walks_every_page_with_a_pause_between_requests() {
    let site = site_with_pages("45", 3);
    let sleeper = RecordingSleeper::default();
    let scraper = SeLogerScraper::with_transport(search(), config(), &site, &sleeper);

    let pages: Vec<ParsedPage> = scraper
        .get_pages(None)
        .collect::<Result<_, _>>()
        .expect("three pages");

    assert_eq!(pages.iter().map(|p| p.index).collect::<Vec<_>>(), [1, 2, 3]);
    assert!(pages.iter().all(|p| p.total_results == 45));
    assert!(pages.iter().all(|p| p.results_per_page == RESULTS_PER_PAGE));
    assert!(pages.iter().all(|p| p.products().len() <= 20));

    let search = search();
    assert_eq!(
        *site.calls.borrow(),
        vec![search.page_url(1), search.page_url(2), search.page_url(3)]
    );
    assert_eq!(
        *sleeper.pauses.borrow(),
        vec![Duration::from_millis(1500), Duration::from_millis(1500)]
    );
}

#[test]
fn max_pages_caps_the_crawl() {
    let site = site_with_pages("1000", 5);
    let sleeper = RecordingSleeper::default();
    let scraper = SeLogerScraper::with_transport(search(), config(), &site, &sleeper);

    let pages: Vec<_> = scraper.get_pages(Some(2)).collect();

    assert_eq!(pages.len(), 2);
    assert_eq!(site.call_count(), 2);
}

#[test]
fn exact_multiple_of_page_size_requests_an_extra_page() {
    let search = search();
    let site = MockSite::new()
        .page(search.page_url(1), result_page(&payload("20", 1, 1, 20)))
        .page(
            search.page_url(2),
            result_page(r#"{"nbresults":"20","nbpage":"2","products":[]}"#),
        );
    let sleeper = RecordingSleeper::default();
    let scraper = SeLogerScraper::with_transport(search.clone(), config(), &site, &sleeper);

    let pages: Vec<ParsedPage> = scraper.get_pages(None).collect::<Result<_, _>>().unwrap();

    assert_eq!(pages.len(), 2);
    assert!(pages[1].products().is_empty());
    assert_eq!(site.calls.borrow().last(), Some(&search.page_url(2)));
}

#[test]
fn pages_are_fetched_on_demand() {
    let site = site_with_pages("100", 6);
    let sleeper = RecordingSleeper::default();
    let scraper = SeLogerScraper::with_transport(search(), config(), &site, &sleeper);

    let mut pages = scraper.get_pages(None);
    assert_eq!(site.call_count(), 0);

    let first = pages.next().unwrap().unwrap();
    assert_eq!(first.index, 1);
    assert_eq!(site.call_count(), 1);
    assert!(sleeper.pauses.borrow().is_empty());

    pages.next().unwrap().unwrap();
    assert_eq!(site.call_count(), 2);
    assert_eq!(sleeper.pauses.borrow().len(), 1);
}

#[test]
fn blocked_first_page_yields_nothing() {
    let search = search();
    let site = MockSite::new().page(search.url(), blocked_page());
    let sleeper = RecordingSleeper::default();
    let scraper = SeLogerScraper::with_transport(search.clone(), config(), &site, &sleeper);

    let mut pages = scraper.get_pages(None);

    let err = pages.next().unwrap().unwrap_err();
    assert!(err.is_blocked());
    assert_eq!(err.page, 1);
    assert_eq!(err.url, search.url());
    assert!(pages.next().is_none());
    assert_eq!(site.call_count(), 1);
}

#[test]
fn error_mid_crawl_ends_the_sequence() {
    let search = search();
    let site = MockSite::new()
        .page(search.page_url(1), result_page(&payload("60", 1, 1, 20)))
        .page(search.page_url(2), "<html><body>maintenance</body></html>".to_string())
        .page(search.page_url(3), result_page(&payload("60", 3, 41, 20)));
    let sleeper = RecordingSleeper::default();
    let scraper = SeLogerScraper::with_transport(search.clone(), config(), &site, &sleeper);

    let results: Vec<_> = scraper.get_pages(None).collect();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert_eq!(err.page, 2);
    assert!(matches!(err.source, ScraperError::Extraction(_)));
    assert_eq!(site.call_count(), 2);
}

#[test]
fn transport_failure_on_later_page_reports_the_page() {
    let search = search();
    // page 2 is unknown to the site: both attempts fail
    let site = MockSite::new().page(search.page_url(1), result_page(&payload("30", 1, 1, 20)));
    let sleeper = RecordingSleeper::default();
    let scraper = SeLogerScraper::with_transport(search.clone(), config(), &site, &sleeper);

    let results: Vec<_> = scraper.get_pages(None).collect();

    let err = results.last().unwrap().as_ref().unwrap_err();
    assert_eq!(err.page, 2);
    assert!(matches!(err.source, ScraperError::Fetch { .. }));
    assert_eq!(site.call_count(), 3);
}

#[test]
fn missing_counters_on_first_page() {
    let search = search();
    let site = MockSite::new().page(search.url(), result_page(r#"{"products":[]}"#));
    let sleeper = RecordingSleeper::default();
    let scraper = SeLogerScraper::with_transport(search, config(), &site, &sleeper);

    let err = scraper.get_pages(None).next().unwrap().unwrap_err();
    assert!(matches!(err.source, ScraperError::UnexpectedShape(_)));
}

#[test]
fn rerunning_a_single_page_crawl_is_identical() {
    let site = site_with_pages("45", 3);
    let sleeper = RecordingSleeper::default();
    let scraper = SeLogerScraper::with_transport(search(), config(), &site, &sleeper);

    let first: Vec<ParsedPage> = scraper.get_pages(Some(1)).collect::<Result<_, _>>().unwrap();
    let second: Vec<ParsedPage> = scraper.get_pages(Some(1)).collect::<Result<_, _>>().unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
    assert_eq!(site.call_count(), 2);
}

#[test]
fn current_parameters_returns_first_payload() {
    let site = site_with_pages("45", 1);
    let sleeper = RecordingSleeper::default();
    let scraper = SeLogerScraper::with_transport(search(), config(), &site, &sleeper);

    let params = scraper.current_parameters(None).unwrap();

    assert_eq!(params["nbresults"], "45");
    assert_eq!(params["products"].as_array().map(Vec::len), Some(20));
}
