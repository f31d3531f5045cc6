// paginator.rs
use crate::scraper::fetcher::Transport;
use crate::scraper::models::{ParsedPage, RESULTS_PER_PAGE};
use crate::scraper::scraper::{LoadedPage, SeLogerScraper};
use crate::scraper::{CrawlError, ScraperError};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Source of the inter-page pause. Swapped out in tests.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Last page index to fetch. Always one more than the full pages, even when
/// the count is an exact multiple of the page size; downstream consumers
/// rely on that ceiling.
pub fn page_ceiling(total_results: u64, max_pages: u32) -> u32 {
    let total_pages = total_results / RESULTS_PER_PAGE + 1;
    total_pages.min(u64::from(max_pages)) as u32
}

/// Read a payload counter such as `nbresults` ("1 234", no-break space as
/// thousands separator) or `nbpage`.
pub fn read_counter(payload: &Value, field: &str) -> Result<u64, ScraperError> {
    let value = payload
        .get(field)
        .ok_or_else(|| ScraperError::UnexpectedShape(format!("{field} missing")))?;

    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s
            .chars()
            .filter(|c| !matches!(c, '\u{a0}' | '\u{202f}' | ' '))
            .collect::<String>()
            .parse::<u64>()
            .ok(),
        _ => None,
    };

    parsed.ok_or_else(|| ScraperError::UnexpectedShape(format!("{field} is not a count: {value}")))
}

enum State {
    Start,
    Paging {
        next: u32,
        last: u32,
        total_results: u64,
    },
    Done,
}

/// Lazy, forward-only sequence of result pages for one search.
///
/// Nothing is fetched until the first call to `next`. The first error ends
/// the sequence.
pub struct Pages<'a, T, S> {
    scraper: &'a SeLogerScraper<T, S>,
    max_pages: u32,
    delay: Duration,
    state: State,
}

impl<'a, T: Transport, S: Sleeper> Pages<'a, T, S> {
    pub(crate) fn new(scraper: &'a SeLogerScraper<T, S>, max_pages: u32, delay: Duration) -> Self {
        Self {
            scraper,
            max_pages,
            delay,
            state: State::Start,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn first_page(&mut self) -> Result<Option<ParsedPage>, CrawlError> {
        let url = self.scraper.search().url();
        info!("Get pages from base url {url}");

        let loaded = self
            .scraper
            .load_page(&url)
            .map_err(|e| CrawlError::new(1, &url, e))?;

        let counters = read_counter(&loaded.payload, "nbresults").and_then(|total| {
            read_counter(&loaded.payload, "nbpage").map(|current| (total, current))
        });
        let (total_results, current) = counters.map_err(|e| CrawlError::new(1, &url, e))?;
        let current = u32::try_from(current).unwrap_or(u32::MAX);

        let last = page_ceiling(total_results, self.max_pages);
        info!("The search returned {total_results} results.");
        info!(
            "{} results in {last} pages will be processed.",
            RESULTS_PER_PAGE * u64::from(last)
        );

        if current > last {
            return Ok(None);
        }

        self.state = State::Paging {
            next: current.saturating_add(1),
            last,
            total_results,
        };
        info!("Page {current} parsed");

        Ok(Some(into_page(loaded, current, total_results)))
    }

    fn following_page(
        &mut self,
        index: u32,
        last: u32,
        total_results: u64,
    ) -> Result<ParsedPage, CrawlError> {
        let url = self.scraper.search().page_url(index);

        self.scraper.pause(self.delay);
        info!("Get url {url}");

        let loaded = self
            .scraper
            .load_page(&url)
            .map_err(|e| CrawlError::new(index, &url, e))?;

        // later pages may omit their counters; page 1's are authoritative
        let own_index = read_counter(&loaded.payload, "nbpage")
            .ok()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(index);
        let own_total = read_counter(&loaded.payload, "nbresults").unwrap_or(total_results);

        self.state = State::Paging {
            next: index.saturating_add(1),
            last,
            total_results,
        };
        info!("Page {index} parsed");

        Ok(into_page(loaded, own_index, own_total))
    }
}

fn into_page(loaded: LoadedPage, index: u32, total_results: u64) -> ParsedPage {
    ParsedPage {
        url: loaded.url,
        index,
        total_results,
        results_per_page: RESULTS_PER_PAGE,
        payload: loaded.payload,
        body: loaded.body,
    }
}

impl<'a, T: Transport, S: Sleeper> Iterator for Pages<'a, T, S> {
    type Item = Result<ParsedPage, CrawlError>;

    fn next(&mut self) -> Option<Self::Item> {
        // Done unless a successful step says otherwise
        match std::mem::replace(&mut self.state, State::Done) {
            State::Done => None,
            State::Start => self.first_page().transpose(),
            State::Paging {
                next,
                last,
                total_results,
            } => {
                if next > last {
                    return None;
                }
                Some(self.following_page(next, last, total_results))
            }
        }
    }
}
