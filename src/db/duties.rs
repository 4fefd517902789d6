//! SQL access for the `uncovered_duties` table.

use crate::db::queries::{map_insert_error, unwrap_conversion};
use crate::errors::{AppError, AppResult};
use crate::models::duty::UncoveredDuty;
use crate::models::status::{DutyStatus, Shift};
use crate::utils::date::parse_db_date;
use rusqlite::{Connection, Result, Row, params};

fn map_duty(row: &Row) -> Result<UncoveredDuty> {
    let date_str: String = row.get(1)?;
    let date = parse_db_date(&date_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let shift_str: String = row.get(3)?;
    let shift = Shift::from_db_str(&shift_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidShift(shift_str.clone())),
        )
    })?;

    let status_str: String = row.get(6)?;
    let status = DutyStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(format!("duty status '{status_str}'"))),
        )
    })?;

    Ok(UncoveredDuty {
        id: row.get(0)?,
        date,
        department: row.get(2)?,
        shift,
        hours_uncovered: row.get(4)?,
        reason: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        status,
        created_at: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
    })
}

pub fn insert_duty(conn: &Connection, d: &UncoveredDuty) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO uncovered_duties
            (duty_id, date, department, shift, hours_uncovered, reason, status, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;

    stmt.execute(params![
        d.id,
        d.date_str(),
        d.department,
        d.shift.to_db_str(),
        d.hours_uncovered,
        d.reason,
        d.status.to_db_str(),
        d.created_at,
    ])
    .map_err(|err| map_insert_error(err, &d.id))?;

    Ok(())
}

pub fn bulk_insert_duties(conn: &mut Connection, duties: &[UncoveredDuty]) -> AppResult<usize> {
    let tx = conn.transaction()?;
    for d in duties {
        insert_duty(&tx, d)?;
    }
    tx.commit()?;
    Ok(duties.len())
}

pub fn load_duties(conn: &Connection) -> AppResult<Vec<UncoveredDuty>> {
    let mut stmt = conn.prepare(
        "SELECT duty_id, date, department, shift, hours_uncovered, reason, status, timestamp
         FROM uncovered_duties
         ORDER BY date ASC, timestamp ASC",
    )?;

    let rows = stmt.query_map([], map_duty)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(unwrap_conversion)?);
    }
    Ok(out)
}

pub fn count_duties(conn: &Connection) -> AppResult<usize> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM uncovered_duties", [], |row| {
        row.get(0)
    })?;
    Ok(n as usize)
}
