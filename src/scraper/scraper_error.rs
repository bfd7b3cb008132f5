use thiserror::Error;

/// Why a single page could not be fetched. The scrape loop logs these and
/// moves on to the next page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timed out after {0}s")]
    Timeout(u64),
}

impl FetchError {
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout_secs)
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
