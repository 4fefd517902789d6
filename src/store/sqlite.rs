use super::{AuditUpdate, RecordStore};
use crate::db::initialize::init_db;
use crate::db::log::{LogRow, load_log, ttlog};
use crate::db::pool::DbPool;
use crate::db::{duties, queries};
use crate::errors::AppResult;
use crate::models::{OvertimeEntry, UncoveredDuty};

/// File-backed store. Owns the only connection of the process, so every
/// write goes through it.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }
}

impl RecordStore for SqliteStore {
    fn insert_overtime(&mut self, entry: &OvertimeEntry) -> AppResult<()> {
        queries::insert_overtime(&self.pool.conn, entry)
    }

    fn bulk_append_overtime(&mut self, entries: &[OvertimeEntry]) -> AppResult<usize> {
        queries::bulk_insert_overtime(&mut self.pool.conn, entries)
    }

    fn select_overtime(&mut self) -> AppResult<Vec<OvertimeEntry>> {
        queries::load_overtime(&self.pool.conn)
    }

    fn find_overtime(&mut self, id: &str) -> AppResult<Option<OvertimeEntry>> {
        queries::find_overtime(&self.pool.conn, id)
    }

    fn update_audit(&mut self, id: &str, update: &AuditUpdate) -> AppResult<bool> {
        queries::update_audit(&self.pool.conn, id, update)
    }

    fn count_overtime(&mut self) -> AppResult<usize> {
        queries::count_overtime(&self.pool.conn)
    }

    fn insert_duty(&mut self, duty: &UncoveredDuty) -> AppResult<()> {
        duties::insert_duty(&self.pool.conn, duty)
    }

    fn bulk_append_duties(&mut self, list: &[UncoveredDuty]) -> AppResult<usize> {
        duties::bulk_insert_duties(&mut self.pool.conn, list)
    }

    fn select_duties(&mut self) -> AppResult<Vec<UncoveredDuty>> {
        duties::load_duties(&self.pool.conn)
    }

    fn count_duties(&mut self) -> AppResult<usize> {
        duties::count_duties(&self.pool.conn)
    }

    fn log_operation(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }

    fn load_log(&mut self) -> AppResult<Vec<LogRow>> {
        load_log(&self.pool.conn)
    }
}
