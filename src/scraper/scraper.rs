// scraper.rs
use crate::config::PipelineConfig;
use crate::errors::Result;
use crate::scraper::{FetchError, ListingLayout, RawListing};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Anything that can hand back the HTML of a numbered results page.
pub trait PageSource {
    fn fetch_page(&self, page: u32) -> std::result::Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
    config: PipelineConfig,
}

impl HttpFetcher {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

impl PageSource for HttpFetcher {
    fn fetch_page(&self, page: u32) -> std::result::Result<String, FetchError> {
        let url = self.config.page_url(page);
        let timeout_secs = self.config.timeout.as_secs();

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::from_reqwest(e, timeout_secs))?;

        // Only transport failures count; an error status still has a body to look at.
        let status = resp.status();
        if !status.is_success() {
            debug!("Page {page} answered HTTP {status}");
        }

        resp.text()
            .map_err(|e| FetchError::from_reqwest(e, timeout_secs))
    }
}

/// What a pass over the page range produced.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    pub listings: Vec<RawListing>,
    pub pages_ok: usize,
    pub pages_failed: Vec<u32>,
    pub pages_empty: Vec<u32>,
}

impl ScrapeOutcome {
    pub fn pages_attempted(&self) -> usize {
        self.pages_ok + self.pages_failed.len() + self.pages_empty.len()
    }
}

/// Walk `start..=end` one page at a time. A failed or empty page is logged
/// and skipped; it never ends the pass.
pub fn scrape_pages<S: PageSource>(
    source: &S,
    layout: &ListingLayout,
    start: u32,
    end: u32,
    delay: Duration,
) -> ScrapeOutcome {
    let mut outcome = ScrapeOutcome::default();

    for page in start..=end {
        if page > start && !delay.is_zero() {
            std::thread::sleep(delay);
        }

        info!("Scraping page {page}...");

        let html = match source.fetch_page(page) {
            Ok(html) => html,
            Err(e) => {
                warn!("Skipping page {page}: {e}");
                outcome.pages_failed.push(page);
                continue;
            }
        };

        let listings = layout.extract(&html);
        if listings.is_empty() {
            warn!("No ads found on page {page}. Possibly JS-rendered.");
            outcome.pages_empty.push(page);
            continue;
        }

        debug!("Page {page}: {} listings", listings.len());
        outcome.pages_ok += 1;
        outcome.listings.extend(listings);
    }

    info!(
        "Scraped {} listings across pages {start} to {end} ({} attempted, {} failed, {} empty)",
        outcome.listings.len(),
        outcome.pages_attempted(),
        outcome.pages_failed.len(),
        outcome.pages_empty.len()
    );

    outcome
}
