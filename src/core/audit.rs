use crate::errors::{AppError, AppResult};
use crate::models::OvertimeEntry;
use crate::models::status::{AuditStatus, accepted};
use crate::store::{AuditUpdate, RecordStore, log_quietly};
use crate::ui::messages::success;

/// Blank text means "leave the stored value as it is".
fn keep_if_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub struct AuditLogic;

impl AuditLogic {
    /// Record the outcome of an audit on one overtime entry and return it
    /// as stored afterwards.
    pub fn apply(
        store: &mut dyn RecordStore,
        id: &str,
        status: &str,
        reviewed_by: Option<&str>,
        comments: Option<&str>,
    ) -> AppResult<OvertimeEntry> {
        let audit_status = AuditStatus::parse(status).ok_or_else(|| {
            AppError::InvalidStatus(format!(
                "'{status}' (expected one of: {})",
                accepted(&AuditStatus::ALL)
            ))
        })?;

        let update = AuditUpdate {
            audit_status,
            reviewed_by: keep_if_blank(reviewed_by),
            discrepancy_comments: keep_if_blank(comments),
        };

        // The row must map before anything is written.
        let mut entry = store
            .find_overtime(id)?
            .ok_or_else(|| AppError::EntryNotFound(id.to_string()))?;

        if !store.update_audit(id, &update)? {
            return Err(AppError::EntryNotFound(id.to_string()));
        }

        entry.audit_status = update.audit_status;
        if let Some(r) = update.reviewed_by {
            entry.reviewed_by = r;
        }
        if let Some(c) = update.discrepancy_comments {
            entry.discrepancy_comments = c;
        }

        log_quietly(
            store,
            "audit",
            id,
            &format!("audit status set to {audit_status}"),
        );
        success(format!("Audit recorded for entry {id}: {audit_status}"));

        Ok(entry)
    }
}
