use crate::dataset::Dataset;
use crate::domain::COLUMNS;
use crate::errors::{PipelineError, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Render the dataset as a single-sheet workbook. Null cells stay blank.
pub fn dataset_xlsx_buffer(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Listings")
        .map_err(|e| PipelineError::XlsxError(format!("Failed to name sheet: {e}")))?;

    // Headers
    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                PipelineError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows
    for (i, listing) in dataset.rows.iter().enumerate() {
        let r = (i + 1) as u32;

        write_opt_str(worksheet, r, 0, listing.title.as_deref())?;
        write_opt_str(worksheet, r, 1, listing.location.as_deref())?;
        write_opt_num(worksheet, r, 2, Some(listing.price as f64))?;
        write_opt_str(worksheet, r, 3, listing.link.as_deref())?;
        write_opt_str(worksheet, r, 4, listing.image.as_deref())?;
        write_opt_str(worksheet, r, 5, listing.info.as_deref())?;
        write_opt_num(worksheet, r, 6, listing.bhk.map(f64::from))?;
        write_opt_num(worksheet, r, 7, listing.bathroom.map(f64::from))?;
        write_opt_num(worksheet, r, 8, listing.area)?;
        write_opt_str(worksheet, r, 9, listing.locality.as_deref())?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| PipelineError::XlsxError(format!("Failed to save workbook: {}", e)))
}

pub fn export_dataset_xlsx(dataset: &Dataset, path: &Path) -> Result<()> {
    let buffer = dataset_xlsx_buffer(dataset)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

fn write_opt_str(ws: &mut Worksheet, row: u32, col: u16, value: Option<&str>) -> Result<()> {
    if let Some(v) = value {
        ws.write_string(row, col, v).map_err(|e| {
            PipelineError::XlsxError(format!("Failed to write {}: {}", COLUMNS[col as usize], e))
        })?;
    }
    Ok(())
}

fn write_opt_num(ws: &mut Worksheet, row: u32, col: u16, value: Option<f64>) -> Result<()> {
    if let Some(v) = value {
        ws.write_number(row, col, v).map_err(|e| {
            PipelineError::XlsxError(format!("Failed to write {}: {}", COLUMNS[col as usize], e))
        })?;
    }
    Ok(())
}
