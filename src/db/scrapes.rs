use crate::errors::{PipelineError, Result};
use rusqlite::{params, Connection};

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRun {
    pub id: i64,
    pub category: String,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub pages_ok: Option<i64>,
    pub pages_failed: Option<i64>,
    pub pages_empty: Option<i64>,
    pub listings_seen: Option<i64>,
    pub rows_rejected: Option<i64>,
    pub rows_added: Option<i64>,
    pub dataset_rows: Option<i64>,
    pub success: bool,
    pub error_message: Option<String>,
}

/// Counters recorded when a run finishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunTotals {
    pub pages_ok: usize,
    pub pages_failed: usize,
    pub pages_empty: usize,
    pub listings_seen: usize,
    pub rows_rejected: usize,
    pub rows_added: usize,
    pub dataset_rows: usize,
}

pub fn start_scrape_run(conn: &Connection, category: &str, now: i64) -> Result<i64> {
    conn.execute(
        "INSERT INTO scrape_runs (category, started_at, success) VALUES (?, ?, 0)",
        params![category, now],
    )
    .map_err(|e| PipelineError::DbError(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

pub fn end_scrape_run(
    conn: &Connection,
    run_id: i64,
    now: i64,
    totals: &RunTotals,
    success: bool,
    error: Option<String>,
) -> Result<()> {
    conn.execute(
        "UPDATE scrape_runs SET finished_at = ?, pages_ok = ?, pages_failed = ?, pages_empty = ?, \
         listings_seen = ?, rows_rejected = ?, rows_added = ?, dataset_rows = ?, success = ?, \
         error_message = ? WHERE id = ?",
        params![
            now,
            totals.pages_ok as i64,
            totals.pages_failed as i64,
            totals.pages_empty as i64,
            totals.listings_seen as i64,
            totals.rows_rejected as i64,
            totals.rows_added as i64,
            totals.dataset_rows as i64,
            success,
            error,
            run_id
        ],
    )
    .map_err(|e| PipelineError::DbError(e.to_string()))?;
    Ok(())
}

pub fn get_recent_scrapes(conn: &Connection, limit: usize) -> Result<Vec<ScrapeRun>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, category, started_at, finished_at, pages_ok, pages_failed, pages_empty, \
             listings_seen, rows_rejected, rows_added, dataset_rows, success, error_message \
             FROM scrape_runs ORDER BY started_at DESC, id DESC LIMIT ?",
        )
        .map_err(|e| PipelineError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(ScrapeRun {
                id: row.get(0)?,
                category: row.get(1)?,
                started_at: row.get(2)?,
                finished_at: row.get(3)?,
                pages_ok: row.get(4)?,
                pages_failed: row.get(5)?,
                pages_empty: row.get(6)?,
                listings_seen: row.get(7)?,
                rows_rejected: row.get(8)?,
                rows_added: row.get(9)?,
                dataset_rows: row.get(10)?,
                success: row.get(11)?,
                error_message: row.get(12)?,
            })
        })
        .map_err(|e| PipelineError::DbError(e.to_string()))?;

    let mut runs = Vec::new();
    for r in rows {
        runs.push(r.map_err(|e| PipelineError::DbError(e.to_string()))?);
    }
    Ok(runs)
}
