// extractor.rs
use crate::scraper::literal::parse_literal;
use crate::scraper::{ExtractionError, ScraperError};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Wrapper div holding the inline script with the search payload.
pub const CONTAINER_SELECTOR: &str = "div.c-wrap-main";

/// The payload object is the script's first `{...}` that is followed by the
/// `ava...` statements of the site's analytics snippet.
const PAYLOAD_PATTERN: &str = r"(\{.*\});ava";

static CONTAINER: LazyLock<Result<Selector, String>> =
    LazyLock::new(|| Selector::parse(CONTAINER_SELECTOR).map_err(|e| e.to_string()));

static PAYLOAD_RE: LazyLock<Result<Regex, String>> =
    LazyLock::new(|| Regex::new(PAYLOAD_PATTERN).map_err(|e| e.to_string()));

/// Pull the embedded payload out of a result page.
pub fn extract(doc: &Html) -> Result<Value, ScraperError> {
    let selector = CONTAINER
        .as_ref()
        .map_err(|e| ScraperError::HtmlParse(e.clone()))?;

    let container = doc
        .select(selector)
        .next()
        .ok_or(ExtractionError::ContainerMissing)?;

    let minified = minify(&container.html());

    let literal = find_payload(&minified)?;
    let payload = parse_literal(&literal).map_err(ExtractionError::MalformedPayload)?;

    Ok(payload)
}

/// NFKD-normalize and drop every space, CR and LF. The payload carries no
/// meaningful whitespace, and NFKD turns no-break spaces into plain ones so
/// they disappear with the rest.
pub fn minify(markup: &str) -> String {
    markup
        .nfkd()
        .filter(|c| !matches!(c, '\n' | '\r' | ' '))
        .collect()
}

fn find_payload(minified: &str) -> Result<String, ScraperError> {
    let pattern = PAYLOAD_RE
        .as_ref()
        .map_err(|e| ScraperError::Pattern(format!("payload pattern: {e}")))?;

    let caps = pattern
        .captures(minified)
        .ok_or(ExtractionError::PatternNotFound)?;

    // group 1 always participates when the pattern matches
    Ok(caps
        .get(1)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default())
}

/// Text content of the whole document, scripts included.
pub fn page_text(doc: &Html) -> String {
    doc.root_element().text().collect()
}
