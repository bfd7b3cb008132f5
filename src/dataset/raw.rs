// src/dataset/raw.rs

use crate::errors::Result;
use crate::scraper::RawListing;
use csv::WriterBuilder;
use std::fs;
use std::path::Path;
use tracing::info;

/// Dump the scraped batch as it came off the pages, before any cleaning.
/// Overwrites `path`; this is a per-run snapshot, not the dataset.
pub fn write_raw_snapshot(path: &Path, listings: &[RawListing]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(["Title", "Location", "Price", "Link", "Image", "Info"])?;
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;

    info!("Wrote {} raw listings to {}", listings.len(), path.display());
    Ok(())
}
