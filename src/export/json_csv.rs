// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// JSON array, pretty-printed.
pub(crate) fn export_json<T: Serialize>(rows: &[T], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Header line first (also for an empty snapshot), then one line per row.
pub fn write_csv<T: Serialize, W: Write>(rows: &[T], headers: &[&str], out: W) -> AppResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    wtr.write_record(headers)?;
    for item in rows {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// The CSV text of a snapshot, as the download button would hand it out.
pub fn csv_string<T: Serialize>(rows: &[T], headers: &[&str]) -> AppResult<String> {
    let mut buf = Vec::new();
    write_csv(rows, headers, &mut buf)?;
    String::from_utf8(buf).map_err(|e| AppError::Export(format!("CSV is not UTF-8: {e}")))
}

pub(crate) fn export_csv<T: Serialize>(rows: &[T], headers: &[&str], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let file = File::create(path)?;
    write_csv(rows, headers, file)?;

    notify_export_success("CSV", path);
    Ok(())
}
