// scraper.rs
use crate::config::CrawlConfig;
use crate::scraper::dump::{dump_page_text, OverwritePrompt};
use crate::scraper::extractor::{extract, page_text};
use crate::scraper::fetcher::{Fetcher, HttpTransport, Transport};
use crate::scraper::paginator::{Pages, Sleeper, ThreadSleeper};
use crate::scraper::records::{records, Records};
use crate::scraper::search::SearchRequest;
use crate::scraper::validator::validate;
use crate::scraper::ScraperError;
use crate::spreadsheets::{Table, TableError};
use scraper::Html;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Crawler for one search on seloger.com.
pub struct SeLogerScraper<T = HttpTransport, S = ThreadSleeper> {
    search: SearchRequest,
    fetcher: Fetcher<T>,
    sleeper: S,
    config: CrawlConfig,
}

/// A fetched page that passed validation, with its payload extracted.
pub(crate) struct LoadedPage {
    pub url: String,
    pub body: String,
    pub payload: Value,
}

impl SeLogerScraper {
    pub fn new(search: SearchRequest, config: CrawlConfig) -> Result<Self, ScraperError> {
        search.parsed_url()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(search, config, transport, ThreadSleeper))
    }
}

impl<T: Transport, S: Sleeper> SeLogerScraper<T, S> {
    pub fn with_transport(search: SearchRequest, config: CrawlConfig, transport: T, sleeper: S) -> Self {
        Self {
            search,
            fetcher: Fetcher::new(transport),
            sleeper,
            config,
        }
    }

    pub fn search(&self) -> &SearchRequest {
        &self.search
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn url(&self) -> String {
        self.search.url()
    }

    /// Result pages, fetched one at a time as the caller pulls them.
    /// `None` uses the configured page ceiling.
    pub fn get_pages(&self, max_pages: Option<u32>) -> Pages<'_, T, S> {
        let max_pages = match max_pages {
            Some(n) if n > 0 => n,
            _ => self.config.max_pages,
        };
        Pages::new(self, max_pages, self.config.delay)
    }

    /// Every listing of every page, echoing the first `config.echo`
    /// listings of each page to stdout.
    pub fn get_results(&self, max_pages: Option<u32>, delay: Option<Duration>) -> Records<Pages<'_, T, S>> {
        let pages = self.get_pages(max_pages);
        let pages = match delay {
            Some(delay) => pages.with_delay(delay),
            None => pages,
        };
        records(pages, self.config.echo)
    }

    /// Crawl to the end and assemble the listings into a normalized table.
    pub fn results_to_table(&self, max_pages: Option<u32>) -> Result<Table, TableError> {
        Table::try_from_results(self.get_results(max_pages, None))
    }

    /// The payload of the search's first page: result counters, the site's
    /// echo of the filters, and the first listings. The page text can be
    /// dumped to a file on the way.
    pub fn current_parameters(
        &self,
        dump: Option<(&Path, &mut dyn OverwritePrompt)>,
    ) -> Result<Value, ScraperError> {
        let url = self.url();
        info!("Get pages from base url {url}");

        let loaded = self.load_page(&url)?;

        if let Some((path, prompt)) = dump {
            let doc = Html::parse_document(&loaded.body);
            dump_page_text(&page_text(&doc), path, prompt)?;
        }

        Ok(loaded.payload)
    }

    /// Fetch, validate, extract.
    pub(crate) fn load_page(&self, url: &str) -> Result<LoadedPage, ScraperError> {
        let fetched = self.fetcher.fetch(url)?;

        let doc = Html::parse_document(&fetched.body);
        if let Err(e) = validate(&doc, &fetched.url) {
            warn!("Invalid result page from {}: {e}", fetched.url);
            return Err(e);
        }
        info!("Valid response from {}", fetched.url);

        let payload = extract(&doc)?;

        Ok(LoadedPage {
            url: fetched.url,
            body: fetched.body,
            payload,
        })
    }

    pub(crate) fn pause(&self, delay: Duration) {
        self.sleeper.sleep(delay);
    }
}
