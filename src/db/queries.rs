use crate::errors::{AppError, AppResult};
use crate::models::overtime::OvertimeEntry;
use crate::models::status::{AuditStatus, EntryStatus};
use crate::utils::date::{format_opt_date, parse_db_date};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params};

const OVERTIME_COLUMNS: &str = "overtime_id, employee_id, name, department, date, hours, depot, \
     approved_by, status, notes, week_start, week_end, roster_group, reviewed_by, audit_status, \
     discrepancy_comments, timestamp";

/// Changes applied by an audit review.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditUpdate {
    pub audit_status: AuditStatus,
    pub reviewed_by: Option<String>,
    pub discrepancy_comments: Option<String>,
}

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

/// Legacy rows may carry NULL in any text column.
fn text(row: &Row, idx: usize) -> Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

pub fn map_row(row: &Row) -> Result<OvertimeEntry> {
    let date_str = text(row, 4)?;
    let date = parse_db_date(&date_str).ok_or_else(|| {
        conversion_error(4, AppError::InvalidDate(date_str.clone()))
    })?;

    let status_str = text(row, 8)?;
    let status = EntryStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(8, AppError::InvalidStatus(format!("status '{status_str}'")))
    })?;

    let audit_str = text(row, 14)?;
    let audit_status = if audit_str.is_empty() {
        AuditStatus::Unaudited
    } else {
        AuditStatus::from_db_str(&audit_str).ok_or_else(|| {
            conversion_error(
                14,
                AppError::InvalidStatus(format!("audit status '{audit_str}'")),
            )
        })?
    };

    Ok(OvertimeEntry {
        id: row.get(0)?,
        employee_id: text(row, 1)?,
        name: text(row, 2)?,
        department: text(row, 3)?,
        date,
        hours: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
        category: text(row, 6)?,
        approved_by: text(row, 7)?,
        status,
        notes: text(row, 9)?,
        week_start: parse_db_date(&text(row, 10)?),
        week_end: parse_db_date(&text(row, 11)?),
        roster_group: text(row, 12)?,
        reviewed_by: text(row, 13)?,
        audit_status,
        discrepancy_comments: text(row, 15)?,
        created_at: text(row, 16)?,
    })
}

/// Turn a primary key violation into `DuplicateId`, pass anything else through.
pub(crate) fn map_insert_error(e: rusqlite::Error, id: &str) -> AppError {
    match &e {
        rusqlite::Error::SqliteFailure(f, _) if f.code == ErrorCode::ConstraintViolation => {
            AppError::DuplicateId(id.to_string())
        }
        _ => AppError::Db(e),
    }
}

pub fn insert_overtime(conn: &Connection, e: &OvertimeEntry) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(&format!(
        "INSERT INTO overtime ({OVERTIME_COLUMNS})
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
    ))?;

    stmt.execute(params![
        e.id,
        e.employee_id,
        e.name,
        e.department,
        e.date_str(),
        e.hours,
        e.category,
        e.approved_by,
        e.status.to_db_str(),
        e.notes,
        format_opt_date(e.week_start),
        format_opt_date(e.week_end),
        e.roster_group,
        e.reviewed_by,
        e.audit_status.to_db_str(),
        e.discrepancy_comments,
        e.created_at,
    ])
    .map_err(|err| map_insert_error(err, &e.id))?;

    Ok(())
}

/// Append every entry inside one transaction: all rows land or none do.
pub fn bulk_insert_overtime(conn: &mut Connection, entries: &[OvertimeEntry]) -> AppResult<usize> {
    let tx = conn.transaction()?;
    for e in entries {
        insert_overtime(&tx, e)?;
    }
    tx.commit()?;
    Ok(entries.len())
}

pub fn load_overtime(conn: &Connection) -> AppResult<Vec<OvertimeEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {OVERTIME_COLUMNS} FROM overtime
         ORDER BY date ASC, timestamp ASC"
    ))?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(unwrap_conversion)?);
    }
    Ok(out)
}

pub fn find_overtime(conn: &Connection, id: &str) -> AppResult<Option<OvertimeEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {OVERTIME_COLUMNS} FROM overtime WHERE overtime_id = ?1"
    ))?;

    let found = stmt
        .query_row([id], map_row)
        .optional()
        .map_err(unwrap_conversion)?;
    Ok(found)
}

/// Update the audit trail of one entry. Returns `false` when `id` matched nothing.
pub fn update_audit(conn: &Connection, id: &str, upd: &AuditUpdate) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE overtime
         SET audit_status = ?1,
             reviewed_by = COALESCE(?2, reviewed_by),
             discrepancy_comments = COALESCE(?3, discrepancy_comments)
         WHERE overtime_id = ?4",
        params![
            upd.audit_status.to_db_str(),
            upd.reviewed_by,
            upd.discrepancy_comments,
            id
        ],
    )?;
    Ok(changed > 0)
}

pub fn count_overtime(conn: &Connection) -> AppResult<usize> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM overtime", [], |row| row.get(0))?;
    Ok(n as usize)
}

/// Surface the domain error hidden inside a row conversion failure.
pub(crate) fn unwrap_conversion(e: rusqlite::Error) -> AppError {
    if let rusqlite::Error::FromSqlConversionFailure(_, _, inner) = &e
        && let Some(app) = inner.downcast_ref::<AppError>()
    {
        return match app {
            AppError::InvalidDate(s) => AppError::InvalidDate(s.clone()),
            AppError::InvalidStatus(s) => AppError::InvalidStatus(s.clone()),
            AppError::InvalidShift(s) => AppError::InvalidShift(s.clone()),
            _ => AppError::Db(e),
        };
    }
    AppError::Db(e)
}
