use crate::scraper::ScraperError;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_2) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/34.0.1847.131 Safari/537.36";

pub const DEFAULT_DELAY_SECS: f64 = 3.0;
pub const DEFAULT_MAX_PAGES: u32 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Crawl tuning knobs. Defaults are polite enough for a single search.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlConfig {
    /// Pause before every page request after the first.
    pub delay: Duration,
    /// Upper bound on result pages, on top of the site's own page count.
    pub max_pages: u32,
    /// Whole-request timeout handed to the HTTP client.
    pub timeout: Duration,
    pub user_agent: String,
    /// Print the first N listings of every page while streaming records.
    pub echo: Option<usize>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            echo: None,
        }
    }
}

impl CrawlConfig {
    /// Defaults overridden by `SELOGER_*` variables (a `.env` file is read
    /// if present).
    pub fn from_env() -> Result<Self, ScraperError> {
        let _ = dotenv();

        let mut config = Self::default();

        if let Some(delay) = env_var("SELOGER_DELAY_SECS") {
            config = config.with_delay_secs(parse_var("SELOGER_DELAY_SECS", &delay)?)?;
        }
        if let Some(max) = env_var("SELOGER_MAX_PAGES") {
            config = config.with_max_pages(parse_var("SELOGER_MAX_PAGES", &max)?);
        }
        if let Some(timeout) = env_var("SELOGER_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_var("SELOGER_TIMEOUT_SECS", &timeout)?);
        }
        if let Some(agent) = env_var("SELOGER_USER_AGENT") {
            config.user_agent = agent;
        }

        Ok(config)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_delay_secs(self, secs: f64) -> Result<Self, ScraperError> {
        let delay = Duration::try_from_secs_f64(secs)
            .map_err(|e| ScraperError::Config(format!("invalid delay {secs}: {e}")))?;
        Ok(self.with_delay(delay))
    }

    /// 0 means "no preference" and keeps the default ceiling.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = if max_pages == 0 {
            DEFAULT_MAX_PAGES
        } else {
            max_pages
        };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_echo(mut self, echo: Option<usize>) -> Self {
        self.echo = echo;
        self
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ScraperError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ScraperError::Config(format!("{name} must be a valid number: {e}")))
}
