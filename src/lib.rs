//! Crawler for seloger.com result pages.
//!
//! A [`SearchRequest`] names a listing segment and the site's query filters.
//! [`SeLogerScraper`] walks the result pages lazily, pulling the payload the
//! site inlines in each page, and flattens it into [`ListingRecord`]s that
//! can be assembled into a numeric-ready [`Table`].

pub mod config;
pub mod filters;
pub mod scraper;
pub mod spreadsheets;


pub use crate::config::CrawlConfig;
pub use crate::scraper::{
    CrawlError, ExtractionError, ListingRecord, ParsedPage, ScraperError, SeLogerScraper,
    SearchRequest, Segment,
};
pub use crate::spreadsheets::{Table, TableError};
