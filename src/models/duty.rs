use super::overtime::new_id;
use super::status::{DutyStatus, Shift};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// A shift that nobody covered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UncoveredDuty {
    pub id: String, // ⇔ uncovered_duties.duty_id
    pub date: NaiveDate,
    pub department: String,
    pub shift: Shift,
    pub hours_uncovered: f64,
    pub reason: String,
    pub status: DutyStatus,
    pub created_at: String, // ⇔ uncovered_duties.timestamp
}

impl UncoveredDuty {
    pub fn new(
        date: NaiveDate,
        department: &str,
        shift: Shift,
        hours_uncovered: f64,
        reason: &str,
        status: DutyStatus,
    ) -> Self {
        Self {
            id: new_id(),
            date,
            department: department.to_string(),
            shift,
            hours_uncovered,
            reason: reason.to_string(),
            status,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_open(&self) -> bool {
        self.status == DutyStatus::Open
    }
}
