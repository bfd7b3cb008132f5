use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::{PipelineConfig, DEFAULT_CATEGORY_PATH, DEFAULT_DATASET, DEFAULT_ORIGIN, DEFAULT_USER_AGENT};
use crate::dataset::{summarize, DatasetStore};
use crate::db::Database;
use crate::domain::AreaPolicy;
use crate::scraper::HttpFetcher;

mod config;
mod dataset;
mod db;
mod domain;
mod errors;
mod pipeline;
mod scraper;
mod spreadsheets;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "smartrent", about = "Rental listings scraper and dataset builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty dataset file
    Init {
        #[arg(long, env = "SMARTRENT_DATASET", default_value = DEFAULT_DATASET)]
        dataset: PathBuf,
    },
    /// Scrape the page range and merge the results into the dataset
    Run(RunArgs),
    /// Summarize the dataset
    Stats {
        #[arg(long, env = "SMARTRENT_DATASET", default_value = DEFAULT_DATASET)]
        dataset: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// Number of localities to list
        #[arg(short = 'n', long, default_value = "15")]
        top: usize,
    },
    /// Export the dataset as an .xlsx workbook
    Export {
        #[arg(long, env = "SMARTRENT_DATASET", default_value = DEFAULT_DATASET)]
        dataset: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Show recent runs from the ledger
    History {
        #[arg(long, env = "SMARTRENT_LEDGER")]
        ledger: PathBuf,
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Args)]
struct RunArgs {
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    origin: String,
    #[arg(long, default_value = DEFAULT_CATEGORY_PATH)]
    category_path: String,
    #[arg(long, default_value = "2")]
    start_page: u32,
    #[arg(long, default_value = "40")]
    end_page: u32,
    #[arg(long, default_value = "60")]
    timeout_secs: u64,
    /// Pause between page requests
    #[arg(long, default_value = "1500")]
    delay_ms: u64,
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    #[arg(long, value_enum, default_value_t = AreaPolicy::LegacySquare)]
    area_policy: AreaPolicy,
    #[arg(long, env = "SMARTRENT_DATASET", default_value = DEFAULT_DATASET)]
    dataset: PathBuf,
    /// Also write the unprocessed scrape to this CSV
    #[arg(long)]
    raw_out: Option<PathBuf>,
    /// Record the run in this SQLite ledger
    #[arg(long, env = "SMARTRENT_LEDGER")]
    ledger: Option<PathBuf>,
}

impl From<RunArgs> for PipelineConfig {
    fn from(args: RunArgs) -> Self {
        PipelineConfig {
            origin: args.origin,
            category_path: args.category_path,
            start_page: args.start_page,
            end_page: args.end_page,
            timeout: Duration::from_secs(args.timeout_secs),
            delay: Duration::from_millis(args.delay_ms),
            user_agent: args.user_agent,
            area_policy: args.area_policy,
            dataset_path: args.dataset,
            raw_out: args.raw_out,
            ledger_path: args.ledger,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dataset } => {
            let store = DatasetStore::create(&dataset)?;
            println!("Created {}", store.path().display());
        }
        Commands::Run(args) => {
            let config = PipelineConfig::from(args);
            config.validate()?;
            let fetcher = HttpFetcher::new(&config).context("building HTTP client")?;

            println!(
                "Scraping {} pages ({} to {}) into {}",
                config.page_count(),
                config.start_page,
                config.end_page,
                config.dataset_path.display()
            );
            let report = pipeline::run_pipeline(&config, &fetcher)?;
            let t = &report.totals;
            println!(
                "Scraped {} listings across pages {} to {} ({} ok, {} failed, {} empty).",
                t.listings_seen, config.start_page, config.end_page, t.pages_ok, t.pages_failed, t.pages_empty
            );
            if !report.failed_pages.is_empty() {
                println!("Skipped pages: {:?}", report.failed_pages);
            }
            println!(
                "Rejected {} rows, added {} rows; dataset has {} rows.",
                t.rows_rejected, t.rows_added, t.dataset_rows
            );
        }
        Commands::Stats { dataset, json, top } => {
            let data = DatasetStore::open(&dataset)?.load()?;
            if data.is_empty() {
                tracing::warn!("{} has no rows yet", dataset.display());
            }
            let summary = summarize(&data, top);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                summary.print();
            }
        }
        Commands::Export { dataset, out } => {
            let data = DatasetStore::open(&dataset)?.load()?;
            spreadsheets::export_dataset_xlsx(&data, &out)
                .with_context(|| format!("exporting to {}", out.display()))?;
            println!("Exported {} rows to {}", data.len(), out.display());
        }
        Commands::History { ledger, limit } => {
            let ledger_db = Database::new(ledger);
            db::init_db(&ledger_db)?;
            let runs = ledger_db.with_conn(|conn| db::get_recent_scrapes(conn, limit))?;
            if runs.is_empty() {
                println!("No runs recorded.");
            }
            for r in runs {
                let started = chrono::DateTime::from_timestamp(r.started_at, 0)
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| r.started_at.to_string());
                println!(
                    "#{:<4} {} | {:<4} | pages ok {:>3} failed {:>3} empty {:>3} | +{} rows (total {}){}",
                    r.id,
                    started,
                    if r.success { "ok" } else { "FAIL" },
                    r.pages_ok.unwrap_or(0),
                    r.pages_failed.unwrap_or(0),
                    r.pages_empty.unwrap_or(0),
                    r.rows_added.unwrap_or(0),
                    r.dataset_rows.unwrap_or(0),
                    r.error_message.map(|m| format!(" | {m}")).unwrap_or_default()
                );
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}
