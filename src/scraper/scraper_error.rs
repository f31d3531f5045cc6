use thiserror::Error;

use crate::scraper::literal::LiteralError;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Transport failure that survived the single retry.
    #[error("Network error on {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("Blocked by site at {url}: they might have detected the crawler, try changing ip")]
    Blocked { url: String },
    #[error("HTML parse error: {0}")]
    HtmlParse(String),
    #[error("Pattern error: {0}")]
    Pattern(String),
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("payload container div.c-wrap-main not found")]
    ContainerMissing,
    #[error("embedded payload object not found")]
    PatternNotFound,
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] LiteralError),
}

/// A failure while producing a page of the crawl. Ends the sequence it
/// was yielded from.
#[derive(Debug, Error)]
#[error("Crawl stopped at page {page} ({url}): {source}")]
pub struct CrawlError {
    pub page: u32,
    pub url: String,
    #[source]
    pub source: ScraperError,
}

impl CrawlError {
    pub fn new(page: u32, url: impl Into<String>, source: ScraperError) -> Self {
        Self {
            page,
            url: url.into(),
            source,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self.source, ScraperError::Blocked { .. })
    }
}
