use crate::scraper::ScraperError;
use clap::ValueEnum;
use indexmap::IndexMap;
use url::Url;

pub const DEFAULT_HOST: &str = "www.seloger.com";
pub const SOLD_HOST: &str = "biens-vendus.seloger.com";

/// Query parameter carrying the page index on result pages after the first.
pub const PAGE_PARAM: &str = "LISTING-LISTpg";

/// Listing category, selected on the site by the `idtt` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Segment {
    Achat,
    Location,
    LocationTemporaire,
    LocationVacances,
    Viager,
    Investissement,
    BiensVendus,
}

impl Segment {
    pub fn code(self) -> u8 {
        match self {
            Segment::Location => 1,
            Segment::Achat => 2,
            Segment::LocationTemporaire => 3,
            Segment::LocationVacances => 4,
            Segment::Viager => 5,
            Segment::Investissement => 6,
            // sold listings live on their own host and reuse code 4
            Segment::BiensVendus => 4,
        }
    }

    pub fn host(self) -> &'static str {
        match self {
            Segment::BiensVendus => SOLD_HOST,
            _ => DEFAULT_HOST,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Segment::Achat => "achat",
            Segment::Location => "location",
            Segment::LocationTemporaire => "location-temporaire",
            Segment::LocationVacances => "location-vacances",
            Segment::Viager => "viager",
            Segment::Investissement => "investissement",
            Segment::BiensVendus => "biens-vendus",
        }
    }
}

/// A search on one segment with site query filters, in insertion order.
///
/// Keys and values are passed through as given; checking them against the
/// filter catalog is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    segment: Segment,
    filters: IndexMap<String, String>,
    host: String,
}

impl SearchRequest {
    pub fn new<I, K, V>(segment: Segment, filters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            segment,
            filters: filters
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            host: segment.host().to_string(),
        }
    }

    /// Point the search at another host (mirror, local fixture server).
    /// May include a scheme; `http://` is assumed otherwise.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn filters(&self) -> &IndexMap<String, String> {
        &self.filters
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// `http://<host>/list.htm?idtt=<code>&key=value...`
    pub fn url(&self) -> String {
        let base = if self.host.contains("://") {
            self.host.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", self.host.trim_end_matches('/'))
        };

        let mut url = format!("{base}/list.htm?idtt={}", self.segment.code());
        for (key, value) in &self.filters {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        url
    }

    /// Like `url`, but rejects hosts or filters that do not form a valid URL.
    pub fn parsed_url(&self) -> Result<Url, ScraperError> {
        Url::parse(&self.url())
            .map_err(|e| ScraperError::Config(format!("invalid search url {}: {e}", self.url())))
    }

    /// URL of result page `index`; page 1 is the search URL itself.
    pub fn page_url(&self, index: u32) -> String {
        if index <= 1 {
            self.url()
        } else {
            format!("{}&{PAGE_PARAM}={index}", self.url())
        }
    }
}
