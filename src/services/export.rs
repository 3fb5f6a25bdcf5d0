//! CSV export of the listing

use crate::model::table::{Column, Row};
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Write a header row plus one line per record; returns the record count
pub fn write_csv<W: Write>(writer: W, columns: &[Column], rows: &[&Row]) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(columns.iter().map(|c| c.label.as_str()))?;
    for row in rows {
        let record: Vec<String> = (0..columns.len()).map(|i| row.cell_text(i)).collect();
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;

    Ok(rows.len())
}

/// Export file name: `<table-id>-<timestamp>.csv`, then `-1`, `-2`... on collision
pub fn export_file_name(table_id: &str, stamp: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}-{}.csv", table_id, stamp)
    } else {
        format!("{}-{}-{}.csv", table_id, stamp, attempt)
    }
}

/// Create a fresh export file; an existing export is never truncated
fn create_export_file(dir: &Path, table_id: &str) -> Result<(PathBuf, File), ExportError> {
    let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let mut attempt = 0;
    loop {
        let path = dir.join(export_file_name(table_id, &stamp, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(err) => return Err(err.into()),
        }
    }
}

/// Export `rows` into a new file under `dir`
pub fn export_table(
    dir: &Path,
    table_id: &str,
    columns: &[Column],
    rows: &[&Row],
) -> Result<PathBuf, ExportError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let (path, file) = create_export_file(dir, table_id)?;
    let count = write_csv(file, columns, rows)?;

    tracing::info!(path = %path.display(), rows = count, "table exported");
    Ok(path)
}
