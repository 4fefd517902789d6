// src/export/model.rs

use crate::models::{OvertimeEntry, UncoveredDuty};
use crate::utils::date::format_opt_date;
use crate::utils::formatting::format_hours;
use serde::{Deserialize, Serialize};

/// Flat overtime row for CSV / JSON / XLSX. Field order is column order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OvertimeExport {
    pub id: String,
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub date: String,
    pub hours: f64,
    pub category: String,
    pub approved_by: String,
    pub status: String,
    pub notes: String,
    pub week_start: Option<String>,
    pub week_end: Option<String>,
    pub roster_group: String,
    pub reviewed_by: String,
    pub audit_status: String,
    pub discrepancy_comments: String,
    pub created_at: String,
}

impl OvertimeExport {
    pub const HEADERS: &'static [&'static str] = &[
        "id",
        "employee_id",
        "name",
        "department",
        "date",
        "hours",
        "category",
        "approved_by",
        "status",
        "notes",
        "week_start",
        "week_end",
        "roster_group",
        "reviewed_by",
        "audit_status",
        "discrepancy_comments",
        "created_at",
    ];

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.employee_id.clone(),
            self.name.clone(),
            self.department.clone(),
            self.date.clone(),
            format_hours(self.hours),
            self.category.clone(),
            self.approved_by.clone(),
            self.status.clone(),
            self.notes.clone(),
            self.week_start.clone().unwrap_or_default(),
            self.week_end.clone().unwrap_or_default(),
            self.roster_group.clone(),
            self.reviewed_by.clone(),
            self.audit_status.clone(),
            self.discrepancy_comments.clone(),
            self.created_at.clone(),
        ]
    }
}

impl From<&OvertimeEntry> for OvertimeExport {
    fn from(e: &OvertimeEntry) -> Self {
        Self {
            id: e.id.clone(),
            employee_id: e.employee_id.clone(),
            name: e.name.clone(),
            department: e.department.clone(),
            date: e.date_str(),
            hours: e.hours,
            category: e.category.clone(),
            approved_by: e.approved_by.clone(),
            status: e.status.to_db_str().to_string(),
            notes: e.notes.clone(),
            week_start: format_opt_date(e.week_start),
            week_end: format_opt_date(e.week_end),
            roster_group: e.roster_group.clone(),
            reviewed_by: e.reviewed_by.clone(),
            audit_status: e.audit_status.to_db_str().to_string(),
            discrepancy_comments: e.discrepancy_comments.clone(),
            created_at: e.created_at.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DutyExport {
    pub id: String,
    pub date: String,
    pub department: String,
    pub shift: String,
    pub hours_uncovered: f64,
    pub reason: String,
    pub status: String,
    pub created_at: String,
}

impl DutyExport {
    pub const HEADERS: &'static [&'static str] = &[
        "id",
        "date",
        "department",
        "shift",
        "hours_uncovered",
        "reason",
        "status",
        "created_at",
    ];

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.clone(),
            self.department.clone(),
            self.shift.clone(),
            format_hours(self.hours_uncovered),
            self.reason.clone(),
            self.status.clone(),
            self.created_at.clone(),
        ]
    }
}

impl From<&UncoveredDuty> for DutyExport {
    fn from(d: &UncoveredDuty) -> Self {
        Self {
            id: d.id.clone(),
            date: d.date_str(),
            department: d.department.clone(),
            shift: d.shift.to_db_str().to_string(),
            hours_uncovered: d.hours_uncovered,
            reason: d.reason.clone(),
            status: d.status.to_db_str().to_string(),
            created_at: d.created_at.clone(),
        }
    }
}

/// Typed spreadsheet cell. Text stays text even when it looks numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// `YYYY-MM-DD` or a timestamp; written as a native date when it parses.
    Date(String),
}

impl CellValue {
    /// Plain text form, used for column widths.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) | CellValue::Date(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn date(s: &str) -> CellValue {
    CellValue::Date(s.to_string())
}

/// Rows that lay themselves out as typed spreadsheet cells.
pub trait ExportRow: Serialize {
    fn cells(&self) -> Vec<CellValue>;
}

impl ExportRow for OvertimeExport {
    fn cells(&self) -> Vec<CellValue> {
        vec![
            text(&self.id),
            text(&self.employee_id),
            text(&self.name),
            text(&self.department),
            date(&self.date),
            CellValue::Number(self.hours),
            text(&self.category),
            text(&self.approved_by),
            text(&self.status),
            text(&self.notes),
            date(self.week_start.as_deref().unwrap_or("")),
            date(self.week_end.as_deref().unwrap_or("")),
            text(&self.roster_group),
            text(&self.reviewed_by),
            text(&self.audit_status),
            text(&self.discrepancy_comments),
            date(&self.created_at),
        ]
    }
}

impl ExportRow for DutyExport {
    fn cells(&self) -> Vec<CellValue> {
        vec![
            text(&self.id),
            date(&self.date),
            text(&self.department),
            text(&self.shift),
            CellValue::Number(self.hours_uncovered),
            text(&self.reason),
            text(&self.status),
            date(&self.created_at),
        ]
    }
}
