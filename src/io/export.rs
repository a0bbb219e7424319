//! Summary-table exports.
//!
//! Each run writes the same table twice: JSON for downstream tooling and
//! plain text for reading. Parent directories are created on demand so a
//! fresh checkout can run the batch without setup.

use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::Path;

use crate::error::AppError;
use crate::report::table::SummaryTable;

/// Write the machine-readable table JSON.
pub fn write_table_json(path: &Path, table: &SummaryTable) -> Result<(), AppError> {
    ensure_parent(path)?;
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create table JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, table)
        .map_err(|e| AppError::new(2, format!("Failed to write table JSON '{}': {e}", path.display())))?;
    Ok(())
}

/// Read a previously exported table JSON.
pub fn read_table_json(path: &Path) -> Result<SummaryTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open table JSON '{}': {e}", path.display())))?;
    let table: SummaryTable = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid table JSON '{}': {e}", path.display())))?;
    Ok(table)
}

/// Write the human-readable text rendering.
pub fn write_table_text(path: &Path, table: &SummaryTable) -> Result<(), AppError> {
    ensure_parent(path)?;
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create table text '{}': {e}", path.display())))?;
    file.write_all(table.as_text().as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write table text '{}': {e}", path.display())))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                AppError::new(2, format!("Failed to create directory '{}': {e}", parent.display()))
            })?;
        }
    }
    Ok(())
}
