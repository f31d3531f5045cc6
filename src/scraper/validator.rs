use crate::scraper::ScraperError;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static META: LazyLock<Result<Selector, String>> =
    LazyLock::new(|| Selector::parse("meta").map_err(|e| e.to_string()));

/// Rejects pages whose first `<meta>` is a robots directive, which the site
/// serves instead of results once it has flagged the client.
///
/// A first `<meta>` without a `name` attribute, or no `<meta>` at all, is a
/// normal page.
pub fn validate(doc: &Html, url: &str) -> Result<(), ScraperError> {
    let selector = META
        .as_ref()
        .map_err(|e| ScraperError::HtmlParse(e.clone()))?;

    let Some(meta) = doc.select(selector).next() else {
        return Ok(());
    };

    match meta.value().attr("name") {
        Some(name) if name.trim().eq_ignore_ascii_case("robots") => Err(ScraperError::Blocked {
            url: url.to_string(),
        }),
        _ => Ok(()),
    }
}
