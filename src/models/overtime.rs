use super::status::{AuditStatus, EntryStatus};
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OvertimeEntry {
    pub id: String,               // ⇔ overtime.overtime_id (TEXT PRIMARY KEY)
    pub employee_id: String,      // ⇔ overtime.employee_id
    pub name: String,             // ⇔ overtime.name
    pub department: String,       // ⇔ overtime.department
    pub date: NaiveDate,          // ⇔ overtime.date (TEXT "YYYY-MM-DD")
    pub hours: f64,               // ⇔ overtime.hours (REAL)
    pub category: String,         // ⇔ overtime.depot (formerly `type`)
    pub approved_by: String,      // ⇔ overtime.approved_by
    pub status: EntryStatus,      // ⇔ overtime.status
    pub notes: String,            // ⇔ overtime.notes
    pub week_start: Option<NaiveDate>,
    pub week_end: Option<NaiveDate>,
    pub roster_group: String,
    pub reviewed_by: String,
    pub audit_status: AuditStatus,
    pub discrepancy_comments: String,
    pub created_at: String, // ⇔ overtime.timestamp (TEXT, RFC 3339)
}

impl OvertimeEntry {
    /// Build a fresh entry with a generated id and creation timestamp.
    /// Audit fields start empty; week bounds are derived from `date`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        employee_id: &str,
        name: &str,
        department: &str,
        date: NaiveDate,
        hours: f64,
        category: &str,
        approved_by: &str,
        status: EntryStatus,
        notes: &str,
    ) -> Self {
        let (week_start, week_end) = week_bounds(date);
        Self {
            id: new_id(),
            employee_id: employee_id.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            date,
            hours,
            category: category.to_string(),
            approved_by: approved_by.to_string(),
            status,
            notes: notes.to_string(),
            week_start: Some(week_start),
            week_end: Some(week_end),
            roster_group: String::new(),
            reviewed_by: String::new(),
            audit_status: AuditStatus::Unaudited,
            discrepancy_comments: String::new(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_pending(&self) -> bool {
        self.status == EntryStatus::Pending
    }

    /// Two entries describe the same piece of work even if their ids differ.
    pub fn same_work_as(&self, other: &OvertimeEntry) -> bool {
        self.employee_id == other.employee_id
            && self.date == other.date
            && self.category == other.category
            && (self.hours - other.hours).abs() < f64::EPSILON
    }
}

/// Generate a new record id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Monday and Sunday of the ISO week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_monday() as i64;
    let start = date - Duration::days(offset);
    (start, start + Duration::days(6))
}
