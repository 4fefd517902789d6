//! Bulk import of CSV files into the record store.
//!
//! Headers are normalised and mapped onto the target table, every row is
//! validated like a form submission, and the whole file is appended in one
//! atomic call. A single bad row aborts the import.

use crate::config::Config;
use crate::core::TableKind;
use crate::core::duty::{DutyFields, build_duty};
use crate::core::entry::{OvertimeFields, build_entry};
use crate::errors::{AppError, AppResult};
use crate::models::status::AuditStatus;
use crate::models::{OvertimeEntry, UncoveredDuty};
use crate::store::{RecordStore, log_quietly};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use crate::utils::table::Table;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const OVERTIME_ALIASES: &[(&str, &[&str])] = &[
    ("id", &["id", "overtime_id"]),
    ("employee_id", &["employee_id", "employee", "emp_id"]),
    ("name", &["name", "employee_name"]),
    ("department", &["department", "dept"]),
    ("date", &["date"]),
    ("hours", &["hours"]),
    ("category", &["category", "type", "depot"]),
    ("approved_by", &["approved_by"]),
    ("status", &["status"]),
    ("notes", &["notes"]),
    ("week_start", &["week_start"]),
    ("week_end", &["week_end"]),
    ("roster_group", &["roster_group"]),
    ("reviewed_by", &["reviewed_by"]),
    ("audit_status", &["audit_status"]),
    ("discrepancy_comments", &["discrepancy_comments"]),
    ("created_at", &["created_at", "timestamp"]),
];

const DUTY_ALIASES: &[(&str, &[&str])] = &[
    ("id", &["id", "duty_id"]),
    ("date", &["date"]),
    ("department", &["department", "dept"]),
    ("shift", &["shift"]),
    ("hours_uncovered", &["hours_uncovered", "hours"]),
    ("reason", &["reason"]),
    ("status", &["status"]),
    ("created_at", &["created_at", "timestamp"]),
];

const OVERTIME_REQUIRED: &[&str] = &["employee_id", "date", "hours"];
const DUTY_REQUIRED: &[&str] = &["date", "department", "shift", "hours_uncovered"];

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OvertimeCsvRow {
    id: Option<String>,
    employee_id: Option<String>,
    name: Option<String>,
    department: Option<String>,
    date: Option<String>,
    hours: Option<String>,
    category: Option<String>,
    approved_by: Option<String>,
    status: Option<String>,
    notes: Option<String>,
    week_start: Option<String>,
    week_end: Option<String>,
    roster_group: Option<String>,
    reviewed_by: Option<String>,
    audit_status: Option<String>,
    discrepancy_comments: Option<String>,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DutyCsvRow {
    id: Option<String>,
    date: Option<String>,
    department: Option<String>,
    shift: Option<String>,
    hours_uncovered: Option<String>,
    reason: Option<String>,
    status: Option<String>,
    created_at: Option<String>,
}

/// Outcome of a completed import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows: usize,
    pub generated_ids: usize,
    pub ignored_columns: Vec<String>,
}

/// A CSV file read into memory, headers mapped onto canonical field names.
pub struct CsvSheet {
    pub original_headers: Vec<String>,
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
    pub ignored_columns: Vec<String>,
}

/// `" Employee ID "` → `employee_id`
pub fn normalize_header(h: &str) -> String {
    h.trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .replace([' ', '-'], "_")
}

fn aliases(table: TableKind) -> &'static [(&'static str, &'static [&'static str])] {
    match table {
        TableKind::Overtime => OVERTIME_ALIASES,
        TableKind::Duties => DUTY_ALIASES,
    }
}

fn canonical(table: TableKind, header: &str) -> Option<&'static str> {
    aliases(table)
        .iter()
        .find(|(_, names)| names.contains(&header))
        .map(|(field, _)| *field)
}

pub fn read_sheet<R: Read>(reader: R, table: TableKind) -> AppResult<CsvSheet> {
    let mut rdr = ReaderBuilder::new().flexible(false).from_reader(reader);

    let raw = rdr.headers()?.clone();
    let original_headers: Vec<String> = raw.iter().map(|h| h.trim().to_string()).collect();

    let mut mapped = Vec::new();
    let mut ignored_columns = Vec::new();
    let mut sources: Vec<(&str, &str)> = Vec::new();
    for h in &original_headers {
        let norm = normalize_header(h);
        match canonical(table, &norm) {
            Some(field) => {
                if let Some((_, first)) = sources.iter().find(|(f, _)| *f == field) {
                    return Err(AppError::Validation(format!(
                        "columns '{first}' and '{h}' both map to '{field}'; keep only one"
                    )));
                }
                sources.push((field, h.as_str()));
                mapped.push(field.to_string());
            }
            None => {
                ignored_columns.push(h.clone());
                mapped.push(format!("__ignored_{norm}"));
            }
        }
    }

    let required = match table {
        TableKind::Overtime => OVERTIME_REQUIRED,
        TableKind::Duties => DUTY_REQUIRED,
    };
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|r| !mapped.iter().any(|m| m == r))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "import file is missing required column(s): {}",
            missing.join(", ")
        )));
    }

    let mut records = Vec::new();
    for r in rdr.records() {
        records.push(r?);
    }

    Ok(CsvSheet {
        original_headers,
        headers: StringRecord::from(mapped),
        records,
        ignored_columns,
    })
}

fn line_of(rec: &StringRecord, index: usize) -> u64 {
    rec.position().map(|p| p.line()).unwrap_or(index as u64 + 2)
}

fn parse_number(raw: &Option<String>, field: &str) -> AppResult<f64> {
    let s = raw.as_deref().unwrap_or("").trim();
    if s.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    s.parse::<f64>()
        .map_err(|_| AppError::Validation(format!("{field} '{s}' is not a number")))
}

fn non_empty(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn overtime_from_row(row: OvertimeCsvRow, cfg: &Config) -> AppResult<(OvertimeEntry, bool)> {
    let fields = OvertimeFields {
        employee_id: row.employee_id.clone().unwrap_or_default(),
        name: row.name.clone().unwrap_or_default(),
        department: row.department.clone().unwrap_or_default(),
        date: row.date.clone().unwrap_or_default(),
        hours: parse_number(&row.hours, "hours")?,
        category: row.category.clone().unwrap_or_default(),
        approved_by: row.approved_by.clone().unwrap_or_default(),
        status: non_empty(&row.status),
        notes: row.notes.clone().unwrap_or_default(),
        week_start: non_empty(&row.week_start),
        week_end: non_empty(&row.week_end),
        roster_group: row.roster_group.clone().unwrap_or_default(),
        reviewed_by: row.reviewed_by.clone().unwrap_or_default(),
    };

    let mut entry = build_entry(&fields, cfg)?;

    if let Some(a) = non_empty(&row.audit_status) {
        entry.audit_status = AuditStatus::parse(&a)
            .ok_or_else(|| AppError::InvalidStatus(format!("audit status '{a}'")))?;
    }
    entry.discrepancy_comments = row.discrepancy_comments.unwrap_or_default();
    if let Some(ts) = non_empty(&row.created_at) {
        entry.created_at = ts;
    }

    let generated = match non_empty(&row.id) {
        Some(id) => {
            entry.id = id;
            false
        }
        None => true,
    };
    Ok((entry, generated))
}

fn duty_from_row(row: DutyCsvRow, cfg: &Config) -> AppResult<(UncoveredDuty, bool)> {
    let fields = DutyFields {
        date: row.date.clone().unwrap_or_default(),
        department: row.department.clone().unwrap_or_default(),
        shift: row.shift.clone().unwrap_or_default(),
        hours_uncovered: parse_number(&row.hours_uncovered, "hours uncovered")?,
        reason: row.reason.clone().unwrap_or_default(),
        status: non_empty(&row.status),
    };

    let mut duty = build_duty(&fields, cfg)?;
    if let Some(ts) = non_empty(&row.created_at) {
        duty.created_at = ts;
    }

    let generated = match non_empty(&row.id) {
        Some(id) => {
            duty.id = id;
            false
        }
        None => true,
    };
    Ok((duty, generated))
}

/// Convert every record; collect all row errors before giving up.
fn convert_rows<Raw, T>(
    sheet: &CsvSheet,
    convert: impl Fn(Raw) -> AppResult<(T, bool)>,
) -> AppResult<(Vec<T>, usize)>
where
    Raw: for<'de> Deserialize<'de>,
{
    let mut out = Vec::new();
    let mut generated = 0;
    let mut errors = Vec::new();

    for (i, rec) in sheet.records.iter().enumerate() {
        let line = line_of(rec, i);
        let parsed = rec
            .deserialize::<Raw>(Some(&sheet.headers))
            .map_err(AppError::from)
            .and_then(&convert);

        match parsed {
            Ok((item, was_generated)) => {
                if was_generated {
                    generated += 1;
                }
                out.push(item);
            }
            Err(e) => errors.push(format!("line {line}: {e}")),
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Import(format!(
            "{} invalid row(s), nothing imported:\n  {}",
            errors.len(),
            errors.join("\n  ")
        )));
    }
    Ok((out, generated))
}

pub struct ImportLogic;

impl ImportLogic {
    /// First `n` rows, rendered with the file's own headers.
    pub fn preview(sheet: &CsvSheet, n: usize, separator: char) -> String {
        let headers: Vec<&str> = sheet.original_headers.iter().map(String::as_str).collect();
        let mut table = Table::with_headers(&headers, 24);
        for rec in sheet.records.iter().take(n) {
            table.add_row(rec.iter().map(str::to_string).collect());
        }
        table.render(separator)
    }

    /// Validate and append an already read sheet.
    pub fn append_sheet(
        store: &mut dyn RecordStore,
        cfg: &Config,
        sheet: &CsvSheet,
        table: TableKind,
    ) -> AppResult<ImportSummary> {
        let (rows, generated_ids) = match table {
            TableKind::Overtime => {
                let (entries, generated) =
                    convert_rows(sheet, |raw: OvertimeCsvRow| overtime_from_row(raw, cfg))?;
                (store.bulk_append_overtime(&entries)?, generated)
            }
            TableKind::Duties => {
                let (duties, generated) =
                    convert_rows(sheet, |raw: DutyCsvRow| duty_from_row(raw, cfg))?;
                (store.bulk_append_duties(&duties)?, generated)
            }
        };

        let summary = ImportSummary {
            rows,
            generated_ids,
            ignored_columns: sheet.ignored_columns.clone(),
        };

        log_quietly(
            store,
            "import",
            table.as_str(),
            &format!("{} row(s) imported", summary.rows),
        );
        Ok(summary)
    }

    /// Read, validate and append without asking anything.
    pub fn import_reader<R: Read>(
        store: &mut dyn RecordStore,
        cfg: &Config,
        reader: R,
        table: TableKind,
    ) -> AppResult<ImportSummary> {
        let sheet = read_sheet(reader, table)?;
        Self::append_sheet(store, cfg, &sheet, table)
    }

    /// Interactive import: preview, confirm, append.
    /// Returns `None` when the user declines.
    pub fn import_file(
        store: &mut dyn RecordStore,
        cfg: &Config,
        path: &Path,
        table: TableKind,
        preview_rows: usize,
        assume_yes: bool,
    ) -> AppResult<Option<ImportSummary>> {
        let file = File::open(path)?;
        let sheet = read_sheet(file, table)?;

        info(format!(
            "{} row(s) read from {} → {}",
            sheet.records.len(),
            path.display(),
            table.as_str()
        ));
        if !sheet.ignored_columns.is_empty() {
            warning(format!(
                "Ignoring unknown column(s): {}",
                sheet.ignored_columns.join(", ")
            ));
        }
        if sheet.records.is_empty() {
            warning("The file has no data rows; nothing to import.");
            return Ok(None);
        }

        if preview_rows > 0 {
            let sep = cfg.separator_char.chars().next().unwrap_or('-');
            println!("\n{}", Self::preview(&sheet, preview_rows, sep));
        }

        if !assume_yes && !confirm("Import these rows?")? {
            warning("Import cancelled: nothing was written.");
            return Ok(None);
        }

        let summary = Self::append_sheet(store, cfg, &sheet, table)?;
        success(format!(
            "Data imported successfully! {} row(s) appended ({} new id(s) generated).",
            summary.rows, summary.generated_ids
        ));
        Ok(Some(summary))
    }
}
