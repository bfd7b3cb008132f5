// config.rs
use crate::domain::AreaPolicy;
use crate::errors::{PipelineError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ORIGIN: &str = "https://www.olx.in";
pub const DEFAULT_CATEGORY_PATH: &str = "en-in/delhi_g4058659/apartments-flats_c1723";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
pub const DEFAULT_DATASET: &str = "data/cleaned_data.csv";

/// Everything one pipeline run needs to know.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Site origin, also used to absolutize relative listing links.
    pub origin: String,
    pub category_path: String,
    pub start_page: u32,
    pub end_page: u32,
    pub timeout: Duration,
    /// Pause between two page requests.
    pub delay: Duration,
    pub user_agent: String,
    pub area_policy: AreaPolicy,
    pub dataset_path: PathBuf,
    pub raw_out: Option<PathBuf>,
    pub ledger_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            category_path: DEFAULT_CATEGORY_PATH.to_string(),
            start_page: 2,
            end_page: 40,
            timeout: Duration::from_secs(60),
            delay: Duration::from_millis(1500),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            area_policy: AreaPolicy::default(),
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            raw_out: None,
            ledger_path: None,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start_page == 0 {
            return Err(PipelineError::Config("start page must be >= 1".into()));
        }
        if self.start_page > self.end_page {
            return Err(PipelineError::Config(format!(
                "start page {} is after end page {}",
                self.start_page, self.end_page
            )));
        }
        if self.timeout.is_zero() {
            return Err(PipelineError::Config("timeout must be non-zero".into()));
        }
        self.origin_url()?;
        Ok(())
    }

    pub fn origin_url(&self) -> Result<Url> {
        let url = Url::parse(&self.origin)
            .map_err(|e| PipelineError::Config(format!("origin '{}': {e}", self.origin)))?;
        if url.cannot_be_a_base() {
            return Err(PipelineError::Config(format!(
                "origin '{}' cannot be used as a base URL",
                self.origin
            )));
        }
        Ok(url)
    }

    /// `{origin}/{category_path}?page={n}`
    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/{}?page={page}",
            self.origin.trim_end_matches('/'),
            self.category_path.trim_matches('/')
        )
    }

    pub fn page_count(&self) -> u32 {
        self.end_page.saturating_sub(self.start_page) + 1
    }
}
