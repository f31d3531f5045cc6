pub mod dump;
pub mod extractor;
pub mod fetcher;
pub mod literal;
pub mod models;
pub mod paginator;
pub mod records;
pub mod search;
mod scraper;
mod scraper_error;
pub mod validator;

pub use dump::{dump_page_text, OverwriteDecision, OverwritePrompt};
pub use fetcher::{Fetcher, HttpTransport, Transport, TransportError};
pub use models::{FetchResult, ListingRecord, ParsedPage, RESULTS_PER_PAGE};
pub use paginator::{page_ceiling, Pages, Sleeper, ThreadSleeper};
pub use records::{echo_listings, records, Records};
pub use scraper::SeLogerScraper;
pub use scraper_error::{CrawlError, ExtractionError, ScraperError};
pub use search::{SearchRequest, Segment};
