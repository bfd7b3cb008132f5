// errors.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a pipeline step. Per-page fetch failures and per-row
/// price failures are recovered locally and never show up here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("Dataset file not found: {} (run `smartrent init` first)", .0.display())]
    StoreMissing(PathBuf),

    #[error("Dataset file already exists: {}", .0.display())]
    StoreExists(PathBuf),

    #[error("Failed to read dataset {}: {reason}", .path.display())]
    StoreRead { path: PathBuf, reason: String },

    #[error("Failed to write dataset {}: {reason}", .path.display())]
    StoreWrite { path: PathBuf, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("XLSX Error: {0}")]
    XlsxError(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
