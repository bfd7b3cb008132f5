// src/dataset/store.rs

use crate::dataset::Dataset;
use crate::domain::{NormalizedListing, COLUMNS};
use crate::errors::{PipelineError, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// The dataset file on disk. Loaded once and saved once per run.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    /// Open an existing store. A missing file is a setup error; nothing
    /// here ever starts a fresh dataset behind the caller's back.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(PipelineError::StoreMissing(path));
        }
        Ok(Self { path })
    }

    /// Create an empty, header-only store. Refuses to touch an existing file.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            return Err(PipelineError::StoreExists(path));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path };
        store.save(&Dataset::default())?;
        info!("Created empty dataset at {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Dataset> {
        let file = File::open(&self.path).map_err(|e| self.read_err(e))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = reader.headers().map_err(|e| self.read_err(e))?.clone();
        let index_col = has_index_column(&headers);
        let headers = if index_col {
            debug!("Dropping leading index column from {}", self.path.display());
            headers.iter().skip(1).collect::<StringRecord>()
        } else {
            headers
        };

        if let Some(col) = COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
            // Locality was added after the first scrapes; everything else is required
            if *col != "Locality" {
                return Err(self.read_err(format!("missing column '{col}'")));
            }
        }

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.read_err(e))?;
            let record: StringRecord = if index_col {
                record.iter().skip(1).collect()
            } else {
                record
            };

            let row: NormalizedListing = record
                .deserialize(Some(&headers))
                .map_err(|e| self.read_err(format!("row {}: {e}", i + 1)))?;
            rows.push(row);
        }

        debug!("Loaded {} rows from {}", rows.len(), self.path.display());
        Ok(Dataset::new(rows))
    }

    /// Write to a temp file beside the target, then rename it over the target.
    /// An interrupted save leaves the previous file untouched.
    pub fn save(&self, dataset: &Dataset) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir).map_err(|e| self.write_err(e))?;
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file());
            writer.write_record(COLUMNS).map_err(|e| self.write_err(e))?;
            for row in &dataset.rows {
                writer.serialize(row).map_err(|e| self.write_err(e))?;
            }
            writer.flush().map_err(|e| self.write_err(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.write_err(e))?;

        tmp.persist(&self.path).map_err(|e| self.write_err(e.error))?;
        debug!("Wrote {} rows to {}", dataset.len(), self.path.display());
        Ok(())
    }

    fn read_err(&self, reason: impl ToString) -> PipelineError {
        PipelineError::StoreRead {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_err(&self, reason: impl ToString) -> PipelineError {
        PipelineError::StoreWrite {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

// Dataframe exports lead with an unnamed row-index column.
fn has_index_column(headers: &StringRecord) -> bool {
    matches!(headers.get(0), Some(h) if h.is_empty() || h.starts_with("Unnamed: "))
}
