use crate::scraper::validator::validate;
use crate::scraper::ScraperError;
use crate::tests::utils::{blocked_page, payload, result_page};
use scraper::Html;

const URL: &str = "http://www.seloger.com/list.htm?idtt=2";

#[test]
fn robots_directive_blocks() {
    let doc = Html::parse_document(&blocked_page());

    let err = validate(&doc, URL).unwrap_err();
    assert!(matches!(err, ScraperError::Blocked { ref url } if url == URL));
}

#[test]
fn first_meta_without_name_is_valid() {
    let doc = Html::parse_document(&result_page(&payload("1", 1, 1, 1)));
    assert!(validate(&doc, URL).is_ok());
}

#[test]
fn only_the_first_meta_is_inspected() {
    let html = r#"<html><head><meta charset="utf-8"><meta name="robots" content="noindex"></head></html>"#;
    assert!(validate(&Html::parse_document(html), URL).is_ok());
}

#[test]
fn other_meta_names_are_valid() {
    let html = r#"<html><head><meta name="viewport" content="width=device-width"></head></html>"#;
    assert!(validate(&Html::parse_document(html), URL).is_ok());
}

#[test]
fn document_without_meta_is_valid() {
    let doc = Html::parse_document("<html><body><p>bonjour</p></body></html>");
    assert!(validate(&doc, URL).is_ok());
}

#[test]
fn marker_match_ignores_case() {
    let html = r#"<html><head><meta name="ROBOTS" content="noindex"></head></html>"#;
    assert!(validate(&Html::parse_document(html), URL).is_err());
}
