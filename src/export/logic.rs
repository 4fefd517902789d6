// src/export/logic.rs

use crate::core::TableKind;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_parent, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{DutyExport, ExportRow, OvertimeExport};
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::models::ReportFilter;
use crate::store::{RecordStore, log_quietly};
use crate::ui::messages::warning;
use crate::utils::path::resolve_output;
use std::path::PathBuf;

pub struct ExportLogic;

impl ExportLogic {
    /// Export one table.
    ///
    /// - `file`: absolute output path, or an existing directory (a default
    ///   file name is then used)
    /// - `range`: `None`, `"all"` or any `--range` expression
    pub fn export(
        store: &mut dyn RecordStore,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        table: TableKind,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let filter = match range {
            None => ReportFilter::default(),
            Some(r) if r.eq_ignore_ascii_case("all") => ReportFilter::default(),
            Some(r) => {
                let (from, to) = parse_range(r)?;
                ReportFilter::between(from, to)
            }
        };

        let written = match table {
            TableKind::Overtime => {
                let rows: Vec<OvertimeExport> = store
                    .select_overtime_filtered(&filter)?
                    .iter()
                    .map(OvertimeExport::from)
                    .collect();
                if rows.is_empty() {
                    warning("No overtime entries found for the selected range.");
                    return Ok(None);
                }
                Self::write_snapshot(
                    &rows,
                    OvertimeExport::HEADERS,
                    format,
                    file,
                    "overtime_data",
                    force,
                )?
            }
            TableKind::Duties => {
                let rows: Vec<DutyExport> = store
                    .select_duties_filtered(&filter)?
                    .iter()
                    .map(DutyExport::from)
                    .collect();
                if rows.is_empty() {
                    warning("No uncovered duties found for the selected range.");
                    return Ok(None);
                }
                Self::write_snapshot(
                    &rows,
                    DutyExport::HEADERS,
                    format,
                    file,
                    "uncovered_duties_data",
                    force,
                )?
            }
        };

        log_quietly(
            store,
            "export",
            &written.to_string_lossy(),
            &format!("{} {} export", table.as_str(), format.as_str()),
        );

        Ok(Some(written))
    }

    /// Write an already selected snapshot in the requested format.
    pub fn write_snapshot<T: ExportRow>(
        rows: &[T],
        headers: &[&str],
        format: ExportFormat,
        file: &str,
        default_stem: &str,
        force: bool,
    ) -> AppResult<PathBuf> {
        let default_name = format!("{default_stem}.{}", format.as_str());
        let path = resolve_output(file, &default_name);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_parent(&path)?;
        ensure_writable(&path, force)?;

        match format {
            ExportFormat::Csv => export_csv(rows, headers, &path)?,
            ExportFormat::Json => export_json(rows, &path)?,
            ExportFormat::Xlsx => export_xlsx(rows, headers, default_stem, &path)?,
        }

        Ok(path)
    }
}
