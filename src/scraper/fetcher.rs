// fetcher.rs
use crate::config::CrawlConfig;
use crate::scraper::models::FetchResult;
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Transport-level failure: no HTTP response was received.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// One GET request. HTTP error statuses are responses, not errors.
pub trait Transport {
    fn get(&self, url: &str, headers: &HeaderMap) -> Result<FetchResult, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, headers: &HeaderMap) -> Result<FetchResult, TransportError> {
        (**self).get(url, headers)
    }
}

/// `reqwest` blocking client carrying the browser user agent on every request.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &CrawlConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScraperError::Config(format!("http client: {e}")))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, headers: &HeaderMap) -> Result<FetchResult, TransportError> {
        let resp = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .map_err(|e| TransportError(e.to_string()))?;

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();

        let body = resp.text().map_err(|e| TransportError(e.to_string()))?;

        Ok(FetchResult {
            url: final_url,
            status,
            body,
        })
    }
}

/// Wraps a transport with the single immediate retry on transport failure.
pub struct Fetcher<T> {
    transport: T,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn fetch(&self, url: &str) -> Result<FetchResult, ScraperError> {
        self.fetch_with_headers(url, &HeaderMap::new())
    }

    pub fn fetch_with_headers(
        &self,
        url: &str,
        headers: &HeaderMap,
    ) -> Result<FetchResult, ScraperError> {
        let result = match self.transport.get(url, headers) {
            Ok(result) => result,
            Err(first) => {
                warn!("Request failed ({first}). Retrying ...");
                self.transport
                    .get(url, headers)
                    .map_err(|e| ScraperError::Fetch {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?
            }
        };

        if !result.is_success() {
            warn!("HTTP {} from {}", result.status, result.url);
        } else {
            debug!("HTTP {} from {} ({} bytes)", result.status, result.url, result.body.len());
        }

        Ok(result)
    }
}
