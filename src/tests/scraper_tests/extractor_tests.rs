use crate::scraper::extractor::{extract, minify, page_text};
use crate::scraper::{ExtractionError, ScraperError};
use crate::tests::utils::{payload, result_page};
use scraper::Html;

#[test]
fn extracts_embedded_payload() {
    let html = result_page(&payload("1\u{a0}234", 1, 1, 3));
    let doc = Html::parse_document(&html);

    let value = extract(&doc).expect("payload");

    assert_eq!(value["nbresults"], "1234");
    assert_eq!(value["nbpage"], "1");
    assert_eq!(value["products"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["products"][2]["idannonce"], "3");
}

#[test]
fn escaped_no_break_space_survives_minification() {
    let html = result_page(r#"{"nbresults":"1\u00a0234","nbpage":"1","products":[]}"#);
    let value = extract(&Html::parse_document(&html)).unwrap();

    assert_eq!(value["nbresults"], "1\u{a0}234");
}

#[test]
fn accented_text_is_decomposed() {
    let html = result_page(r#"{"ville":"Paris 15ème","products":[]}"#);
    let value = extract(&Html::parse_document(&html)).unwrap();

    assert_eq!(value["ville"], "Paris15e\u{300}me");
}

#[test]
fn minify_drops_layout_whitespace() {
    assert_eq!(minify("{ \"a\" :\r\n \"1\u{a0}234\" }"), "{\"a\":\"1234\"}");
    assert_eq!(minify("\tx"), "\tx");
}

#[test]
fn missing_container() {
    let doc = Html::parse_document("<html><body><div class=\"other\">{}</div></body></html>");

    let err = extract(&doc).unwrap_err();
    assert!(matches!(
        err,
        ScraperError::Extraction(ExtractionError::ContainerMissing)
    ));
}

#[test]
fn container_without_trailing_marker() {
    let html = r#"<div class="c-wrap-main"><script>var data = {"nbpage":"1"};</script></div>"#;

    let err = extract(&Html::parse_document(html)).unwrap_err();
    assert!(matches!(
        err,
        ScraperError::Extraction(ExtractionError::PatternNotFound)
    ));
}

#[test]
fn malformed_payload() {
    let html = result_page(r#"{"nbpage":"1","products":[{"idannonce":}]}"#);

    let err = extract(&Html::parse_document(&html)).unwrap_err();
    assert!(matches!(
        err,
        ScraperError::Extraction(ExtractionError::MalformedPayload(_))
    ));
}

#[test]
fn page_text_includes_script_content() {
    let html = result_page(&payload("5", 1, 1, 1));
    let text = page_text(&Html::parse_document(&html));

    assert!(text.contains("Annonces immobilières"));
    assert!(text.contains("ava_data"));
}

#[test]
fn deeply_nested_payload_is_malformed() {
    let depth = 10_000;
    let html = result_page(&format!(
        "{{\"nbpage\":\"1\",\"products\":{}{}}}",
        "[".repeat(depth),
        "]".repeat(depth)
    ));

    let err = extract(&Html::parse_document(&html)).unwrap_err();
    assert!(matches!(
        err,
        ScraperError::Extraction(ExtractionError::MalformedPayload(_))
    ));
}
