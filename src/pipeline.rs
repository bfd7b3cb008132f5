// pipeline.rs
use crate::config::PipelineConfig;
use crate::dataset::{merge, write_raw_snapshot, DatasetStore};
use crate::db::{self, Database, RunTotals};
use crate::domain::normalize_batch;
use crate::errors::Result;
use crate::scraper::{scrape_pages, ListingLayout, PageSource};
use chrono::Utc;
use tracing::{error, info, warn};

/// What one run did, for the caller to print.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub totals: RunTotals,
    pub failed_pages: Vec<u32>,
    pub empty_pages: Vec<u32>,
    pub ledger_run_id: Option<i64>,
}

/// Scrape, normalize and merge one batch into the dataset file.
///
/// The store must already exist; it is checked before any page is fetched,
/// loaded only once scraping is done, and rewritten in one atomic step.
pub fn run_pipeline<S: PageSource>(config: &PipelineConfig, source: &S) -> Result<RunReport> {
    config.validate()?;
    let store = DatasetStore::open(&config.dataset_path)?;
    let layout = ListingLayout::olx(config.origin_url()?)?;

    let ledger = match &config.ledger_path {
        Some(path) => {
            let ledger_db = Database::new(path);
            db::init_db(&ledger_db)?;
            let run_id = ledger_db.with_conn(|conn| {
                db::start_scrape_run(conn, &config.category_path, Utc::now().timestamp())
            })?;
            Some((ledger_db, run_id))
        }
        None => None,
    };

    let mut report = RunReport {
        ledger_run_id: ledger.as_ref().map(|(_, id)| *id),
        ..Default::default()
    };
    let result = execute(config, source, &layout, &store, &mut report);

    if let Some((ledger_db, run_id)) = &ledger {
        let error_message = result.as_ref().err().map(|e| e.to_string());
        let recorded = ledger_db.with_conn(|conn| {
            db::end_scrape_run(
                conn,
                *run_id,
                Utc::now().timestamp(),
                &report.totals,
                result.is_ok(),
                error_message,
            )
        });
        if let Err(e) = recorded {
            warn!("Could not record run {run_id} in ledger: {e}");
        }
    }

    match result {
        Ok(()) => Ok(report),
        Err(e) => {
            error!("Run aborted: {e}");
            Err(e)
        }
    }
}

fn execute<S: PageSource>(
    config: &PipelineConfig,
    source: &S,
    layout: &ListingLayout,
    store: &DatasetStore,
    report: &mut RunReport,
) -> Result<()> {
    let outcome = scrape_pages(
        source,
        layout,
        config.start_page,
        config.end_page,
        config.delay,
    );
    report.totals.pages_ok = outcome.pages_ok;
    report.totals.pages_failed = outcome.pages_failed.len();
    report.totals.pages_empty = outcome.pages_empty.len();
    report.totals.listings_seen = outcome.listings.len();
    report.failed_pages = outcome.pages_failed.clone();
    report.empty_pages = outcome.pages_empty.clone();

    if let Some(path) = &config.raw_out {
        write_raw_snapshot(path, &outcome.listings)?;
    }

    let normalized = normalize_batch(&outcome.listings, config.area_policy);
    report.totals.rows_rejected = normalized.rejected.len();

    let existing = store.load()?;
    let existing_rows = existing.len();
    let merged = merge(existing, normalized.listings);
    store.save(&merged.dataset)?;

    report.totals.rows_added = merged.added;
    report.totals.dataset_rows = merged.dataset.len();

    info!(
        "Merged {} unique new rows into {} existing: {} added, dataset now {} rows",
        merged.batch_unique,
        existing_rows,
        merged.added,
        merged.dataset.len()
    );
    Ok(())
}
