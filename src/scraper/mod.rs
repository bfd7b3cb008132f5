pub mod extractor;
mod models;
mod scraper;
mod scraper_error;

pub use extractor::ListingLayout;
pub use models::RawListing;
pub use self::scraper::{scrape_pages, HttpFetcher, PageSource};
pub use scraper_error::FetchError;
