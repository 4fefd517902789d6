use super::{AuditUpdate, RecordStore};
use crate::db::log::LogRow;
use crate::errors::{AppError, AppResult};
use crate::models::{OvertimeEntry, UncoveredDuty};
use chrono::Local;
use std::collections::HashSet;

/// Non-durable store: state lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    overtime: Vec<OvertimeEntry>,
    duties: Vec<UncoveredDuty>,
    log: Vec<LogRow>,
}

/// Reject ids already present or repeated inside `incoming`.
fn check_new_ids<'a>(
    existing: impl Iterator<Item = &'a str>,
    incoming: impl Iterator<Item = &'a str>,
) -> AppResult<()> {
    let mut seen: HashSet<&str> = existing.collect();
    for id in incoming {
        if !seen.insert(id) {
            return Err(AppError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

impl RecordStore for MemoryStore {
    fn insert_overtime(&mut self, entry: &OvertimeEntry) -> AppResult<()> {
        self.bulk_append_overtime(std::slice::from_ref(entry))?;
        Ok(())
    }

    fn bulk_append_overtime(&mut self, entries: &[OvertimeEntry]) -> AppResult<usize> {
        check_new_ids(
            self.overtime.iter().map(|e| e.id.as_str()),
            entries.iter().map(|e| e.id.as_str()),
        )?;
        self.overtime.extend_from_slice(entries);
        Ok(entries.len())
    }

    fn select_overtime(&mut self) -> AppResult<Vec<OvertimeEntry>> {
        let mut out = self.overtime.clone();
        out.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(out)
    }

    fn find_overtime(&mut self, id: &str) -> AppResult<Option<OvertimeEntry>> {
        Ok(self.overtime.iter().find(|e| e.id == id).cloned())
    }

    fn update_audit(&mut self, id: &str, update: &AuditUpdate) -> AppResult<bool> {
        let Some(entry) = self.overtime.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        entry.audit_status = update.audit_status;
        if let Some(r) = &update.reviewed_by {
            entry.reviewed_by = r.clone();
        }
        if let Some(c) = &update.discrepancy_comments {
            entry.discrepancy_comments = c.clone();
        }
        Ok(true)
    }

    fn count_overtime(&mut self) -> AppResult<usize> {
        Ok(self.overtime.len())
    }

    fn insert_duty(&mut self, duty: &UncoveredDuty) -> AppResult<()> {
        self.bulk_append_duties(std::slice::from_ref(duty))?;
        Ok(())
    }

    fn bulk_append_duties(&mut self, duties: &[UncoveredDuty]) -> AppResult<usize> {
        check_new_ids(
            self.duties.iter().map(|d| d.id.as_str()),
            duties.iter().map(|d| d.id.as_str()),
        )?;
        self.duties.extend_from_slice(duties);
        Ok(duties.len())
    }

    fn select_duties(&mut self) -> AppResult<Vec<UncoveredDuty>> {
        let mut out = self.duties.clone();
        out.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(out)
    }

    fn count_duties(&mut self) -> AppResult<usize> {
        Ok(self.duties.len())
    }

    fn log_operation(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.log.push(LogRow {
            id: self.log.len() as i64 + 1,
            date: Local::now().to_rfc3339(),
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn load_log(&mut self) -> AppResult<Vec<LogRow>> {
        Ok(self.log.clone())
    }
}
