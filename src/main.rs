use clap::{Args, Parser, Subcommand};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use seloger_scraper::filters::{self, help};
use seloger_scraper::scraper::{OverwriteDecision, OverwritePrompt};
use seloger_scraper::spreadsheets::{save_csv, save_records_json, save_xlsx};
use seloger_scraper::{
    CrawlConfig, ListingRecord, ScraperError, SeLogerScraper, SearchRequest, Segment, Table,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "seloger", version, about = "Crawl seloger.com search results")]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Crawl every result page and export the listings
    Crawl {
        #[command(flatten)]
        search: SearchArgs,

        #[arg(long, value_name = "N")]
        max_pages: Option<u32>,

        /// Seconds to wait between page requests
        #[arg(long, value_name = "SECS")]
        delay: Option<f64>,

        /// Print the first N listings of every page
        #[arg(long, value_name = "N")]
        echo: Option<usize>,

        /// .csv, .xlsx or .json
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the payload of the first result page
    Params {
        #[command(flatten)]
        search: SearchArgs,

        /// Also write the page text to FILE
        #[arg(long, value_name = "FILE")]
        dump: Option<PathBuf>,
    },
    /// Show the search filters the site understands
    Filters {
        /// sort-by, property-type, property-size, kitchen-and-heating,
        /// amenities-and-ad-filters
        #[arg(long)]
        section: Option<String>,

        #[arg(long, conflicts_with = "section")]
        all: bool,
    },
}

#[derive(Debug, Args)]
struct SearchArgs {
    #[arg(short, long, value_enum, default_value_t = Segment::Achat)]
    segment: Segment,

    /// Raw site filter, e.g. -f cp=75 -f idtypebien=1,2
    #[arg(short = 'f', long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    filters: Vec<(String, String)>,

    /// Switch filter by catalog name, e.g. --with Lift
    #[arg(long = "with", value_name = "NAME")]
    with: Vec<String>,

    /// Override the site host
    #[arg(long)]
    host: Option<String>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

impl SearchArgs {
    fn into_request(self) -> Result<SearchRequest, ScraperError> {
        let mut filters = self.filters;
        for name in &self.with {
            let (key, value) = filters::lookup(name).ok_or_else(|| {
                ScraperError::Config(format!("unknown filter '{name}', see `seloger filters`"))
            })?;
            filters.push((key.to_string(), value.to_string()));
        }

        let request = SearchRequest::new(self.segment, filters);
        Ok(match self.host {
            Some(host) => request.with_host(host),
            None => request,
        })
    }
}

/// Asks on the terminal before a dump replaces an existing file.
struct ConsolePrompt {
    theme: ColorfulTheme,
}

impl OverwritePrompt for ConsolePrompt {
    fn on_existing(&mut self, path: &Path) -> Result<OverwriteDecision, ScraperError> {
        let overwrite = Confirm::with_theme(&self.theme)
            .with_prompt(format!("{} exists already. Do you want to overwrite?", path.display()))
            .default(false)
            .interact()
            .map_err(prompt_error)?;
        if overwrite {
            return Ok(OverwriteDecision::Overwrite);
        }

        let other: String = Input::with_theme(&self.theme)
            .with_prompt("New path to file (empty to cancel)")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        Ok(if other.trim().is_empty() {
            OverwriteDecision::Cancel
        } else {
            OverwriteDecision::Rename(PathBuf::from(other.trim()))
        })
    }
}

fn prompt_error(e: dialoguer::Error) -> ScraperError {
    ScraperError::Io(std::io::Error::other(e.to_string()))
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,seloger_scraper=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn default_output(segment: Segment) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("seloger_{}_{stamp}.csv", segment.slug()))
}

fn crawl(
    search: SearchArgs,
    max_pages: Option<u32>,
    delay: Option<f64>,
    echo: Option<usize>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let mut config = CrawlConfig::from_env()?;
    if let Some(max) = max_pages {
        config = config.with_max_pages(max);
    }
    if let Some(secs) = delay {
        config = config.with_delay_secs(secs)?;
    }
    config = config.with_echo(echo);

    let request = search.into_request()?;
    let segment = request.segment();
    let scraper = SeLogerScraper::new(request, config)?;

    let records = scraper
        .get_results(None, None)
        .collect::<Result<Vec<ListingRecord>, _>>()?;
    info!("{} listings collected", records.len());

    let output = output.unwrap_or_else(|| default_output(segment));
    let extension = output
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => save_records_json(&records, &output)?,
        Some("xlsx") => save_xlsx(&Table::from_records(records)?, &output)?,
        _ => save_csv(&Table::from_records(records)?, &output)?,
    }

    println!("✅ Listings written to {}", output.display());
    Ok(())
}

fn params(search: SearchArgs, dump: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let config = CrawlConfig::from_env()?;
    let scraper = SeLogerScraper::new(search.into_request()?, config)?;

    let mut console = ConsolePrompt {
        theme: ColorfulTheme::default(),
    };
    let payload = match dump.as_deref() {
        Some(path) => {
            let prompt: &mut dyn OverwritePrompt = &mut console;
            scraper.current_parameters(Some((path, prompt)))?
        }
        None => scraper.current_parameters(None)?,
    };

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn show_filters(section: Option<String>, all: bool) -> Result<(), Box<dyn Error>> {
    let mut out = std::io::stdout().lock();

    if all {
        help::write_all(&mut out)?;
        return Ok(());
    }

    match section {
        Some(key) => {
            let section = filters::section(&key).ok_or_else(|| format!("unknown section '{key}'"))?;
            help::write_section(&mut out, section)?;
        }
        None => {
            drop(out);
            help::browse()?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Crawl {
            search,
            max_pages,
            delay,
            echo,
            output,
        } => crawl(search, max_pages, delay, echo, output),
        Command::Params { search, dump } => params(search, dump),
        Command::Filters { section, all } => show_filters(section, all),
    };

    if let Err(e) = result {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
