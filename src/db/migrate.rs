use crate::db::log::ttlog;
use crate::db::pool::database_file;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// One schema step. Applied at most once; the ledger lives in the `log` table.
pub struct Migration {
    pub id: &'static str,
    pub description: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

/// Ordered list of every schema step. Append only.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        id: "0001_create_overtime",
        description: "Create overtime table",
        apply: create_overtime_table,
    },
    Migration {
        id: "0002_rename_type_to_depot",
        description: "Rename overtime.type to overtime.depot",
        apply: rename_type_to_depot,
    },
    Migration {
        id: "0003_add_audit_columns",
        description: "Add weekly audit trail columns to overtime",
        apply: add_audit_columns,
    },
    Migration {
        id: "0004_create_uncovered_duties",
        description: "Create uncovered_duties table",
        apply: create_uncovered_duties_table,
    },
    Migration {
        id: "0005_create_indexes",
        description: "Create date indexes",
        apply: create_indexes,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Column names of `table`, in declaration order.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    Ok(table_columns(conn, table)?.iter().any(|c| c == column))
}

/// Legacy shape: the very first overtime table, `type` column included.
fn create_overtime_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS overtime (
            overtime_id TEXT PRIMARY KEY,
            employee_id TEXT,
            name        TEXT,
            department  TEXT,
            date        TEXT,
            hours       REAL,
            type        TEXT,
            approved_by TEXT,
            status      TEXT,
            notes       TEXT
        );
        "#,
    )
}

fn rename_type_to_depot(conn: &Connection) -> Result<()> {
    let has_type = has_column(conn, "overtime", "type")?;
    let has_depot = has_column(conn, "overtime", "depot")?;

    match (has_type, has_depot) {
        (true, false) => {
            conn.execute_batch("ALTER TABLE overtime RENAME COLUMN type TO depot;")?;
            success("Renamed overtime.type to overtime.depot.");
        }
        (true, true) => {
            warning("overtime has both 'type' and 'depot' columns; 'type' is left untouched.");
        }
        _ => {}
    }
    Ok(())
}

fn add_audit_columns(conn: &Connection) -> Result<()> {
    let columns = [
        ("week_start", "TEXT"),
        ("week_end", "TEXT"),
        ("roster_group", "TEXT DEFAULT ''"),
        ("reviewed_by", "TEXT DEFAULT ''"),
        ("audit_status", "TEXT DEFAULT 'Unaudited'"),
        ("discrepancy_comments", "TEXT DEFAULT ''"),
        ("timestamp", "TEXT DEFAULT ''"),
    ];

    let existing = table_columns(conn, "overtime")?;
    for (name, decl) in columns {
        if !existing.iter().any(|c| c == name) {
            conn.execute_batch(&format!("ALTER TABLE overtime ADD COLUMN {name} {decl};"))?;
        }
    }
    Ok(())
}

fn create_uncovered_duties_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS uncovered_duties (
            duty_id         TEXT PRIMARY KEY,
            date            TEXT NOT NULL,
            department      TEXT NOT NULL,
            shift           TEXT NOT NULL,
            hours_uncovered REAL NOT NULL DEFAULT 0,
            reason          TEXT DEFAULT '',
            status          TEXT NOT NULL DEFAULT 'Open',
            timestamp       TEXT DEFAULT ''
        );
        "#,
    )
}

fn create_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_overtime_date ON overtime(date);
        CREATE INDEX IF NOT EXISTS idx_duties_date ON uncovered_duties(date);
        "#,
    )
}

fn is_applied(conn: &Connection, id: &str) -> Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([id], |_| Ok(())).optional()?.is_some())
}

/// Ids of every migration recorded in the ledger, in application order.
/// Read-only: a database without a `log` table has applied nothing.
pub fn applied_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    if !table_exists(conn, "log")? {
        return Ok(Vec::new());
    }
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static Migration>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.id)? {
            out.push(m);
        }
    }
    Ok(out)
}

fn backup_before_migration(db_path: &str) -> AppResult<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let src = Path::new(db_path);
    let backup_name = format!(
        "{}-backup_db_pre_migration.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let backup_path = src
        .parent()
        .map(|p| p.join(&backup_name))
        .unwrap_or_else(|| backup_name.clone().into());

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| AppError::Migration(format!("backup failed (start_file): {e}")))?;

    let db_content = fs::read(src)?;
    zip.write_all(&db_content)?;
    zip.finish()
        .map_err(|e| AppError::Migration(format!("backup failed (finish): {e}")))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations, in order.
///
/// Each step runs in its own transaction together with its ledger row, so a
/// failed step leaves the schema exactly as the previous step left it.
/// Returns how many steps were applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    let pending = pending_migrations(conn)?;
    if pending.is_empty() {
        return Ok(0);
    }

    // Existing data is about to be reshaped → safety copy first.
    if table_exists(conn, "overtime")? {
        let db_path = database_file(conn);
        if db_path.is_empty() {
            warning("In-memory database: pre-migration backup skipped.");
        } else {
            warning("Existing schema needs migration, creating safety backup...");
            backup_before_migration(&db_path)?;
        }
    }

    let mut applied = 0;
    for m in pending {
        if let Err(e) = apply_one(conn, m) {
            warning(format!("Migration {} failed: {}", m.id, e));
            if let Err(log_err) = ttlog(conn, "migration_failed", m.id, &e.to_string()) {
                warning(format!("Failed to write internal log: {log_err}"));
            }
            return Err(AppError::Migration(format!("{}: {}", m.id, e)));
        }
        applied += 1;
    }

    Ok(applied)
}

fn apply_one(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    (m.apply)(&tx)?;
    ttlog(&tx, "migration_applied", m.id, m.description)?;
    tx.commit()?;
    success(format!("Migration applied: {} → {}", m.id, m.description));
    Ok(())
}
