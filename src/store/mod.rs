//! Record store: the single data-access seam used by every command.
//!
//! Two strategies sit behind the same trait: a SQLite file (`SqliteStore`)
//! and a process-lifetime vector store (`MemoryStore`).

pub mod memory;
pub mod sqlite;

pub use crate::db::queries::AuditUpdate;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::config::{Config, StorageKind};
use crate::db::log::LogRow;
use crate::errors::AppResult;
use crate::models::{OvertimeEntry, ReportFilter, UncoveredDuty};

pub trait RecordStore {
    fn insert_overtime(&mut self, entry: &OvertimeEntry) -> AppResult<()>;

    /// All-or-nothing append. Returns the number of rows written.
    fn bulk_append_overtime(&mut self, entries: &[OvertimeEntry]) -> AppResult<usize>;

    fn select_overtime(&mut self) -> AppResult<Vec<OvertimeEntry>>;

    fn find_overtime(&mut self, id: &str) -> AppResult<Option<OvertimeEntry>>;

    /// Returns `false` when no entry has `id`; the store itself stays silent.
    fn update_audit(&mut self, id: &str, update: &AuditUpdate) -> AppResult<bool>;

    fn count_overtime(&mut self) -> AppResult<usize>;

    fn insert_duty(&mut self, duty: &UncoveredDuty) -> AppResult<()>;

    fn bulk_append_duties(&mut self, duties: &[UncoveredDuty]) -> AppResult<usize>;

    fn select_duties(&mut self) -> AppResult<Vec<UncoveredDuty>>;

    fn count_duties(&mut self) -> AppResult<usize>;

    fn log_operation(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()>;

    fn load_log(&mut self) -> AppResult<Vec<LogRow>>;

    /// Full scan, then filter in the caller.
    fn select_overtime_filtered(&mut self, filter: &ReportFilter) -> AppResult<Vec<OvertimeEntry>> {
        Ok(self
            .select_overtime()?
            .into_iter()
            .filter(|e| filter.matches_overtime(e))
            .collect())
    }

    fn select_duties_filtered(&mut self, filter: &ReportFilter) -> AppResult<Vec<UncoveredDuty>> {
        Ok(self
            .select_duties()?
            .into_iter()
            .filter(|d| filter.matches_duty(d))
            .collect())
    }
}

/// Open the store selected by the configuration, schema ensured.
pub fn open(cfg: &Config) -> AppResult<Box<dyn RecordStore>> {
    match cfg.storage {
        StorageKind::Sqlite => Ok(Box::new(SqliteStore::open(&cfg.database)?)),
        StorageKind::Memory => Ok(Box::new(MemoryStore::default())),
    }
}

/// Log an operation without letting a log failure fail the caller.
pub fn log_quietly(store: &mut dyn RecordStore, operation: &str, target: &str, message: &str) {
    if let Err(e) = store.log_operation(operation, target, message) {
        crate::ui::messages::warning(format!("Failed to write internal log: {e}"));
    }
}
