use crate::db::migrate::{MIGRATIONS, applied_migrations, table_exists};
use crate::errors::AppResult;
use crate::models::status::{AuditStatus, DutyStatus, EntryStatus, Shift};
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};
use rusqlite::Connection;
use std::fs;

/// Rows that break the enum / range rules the schema itself does not enforce.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DataIssues {
    pub bad_status: usize,
    pub bad_audit_status: usize,
    pub negative_hours: usize,
    pub bad_duty_status: usize,
    pub bad_shift: usize,
    pub negative_uncovered: usize,
}

impl DataIssues {
    pub fn total(&self) -> usize {
        self.bad_status
            + self.bad_audit_status
            + self.negative_hours
            + self.bad_duty_status
            + self.bad_shift
            + self.negative_uncovered
    }
}

fn sql_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(",")
}

fn count(conn: &Connection, sql: &str) -> rusqlite::Result<usize> {
    let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(n as usize)
}

pub fn find_data_issues(conn: &Connection) -> rusqlite::Result<DataIssues> {
    let statuses: Vec<&str> = EntryStatus::ALL.iter().map(|s| s.to_db_str()).collect();
    let audits: Vec<&str> = AuditStatus::ALL.iter().map(|s| s.to_db_str()).collect();
    let duty_statuses: Vec<&str> = DutyStatus::ALL.iter().map(|s| s.to_db_str()).collect();
    let shifts: Vec<&str> = Shift::ALL.iter().map(|s| s.to_db_str()).collect();

    Ok(DataIssues {
        bad_status: count(
            conn,
            &format!(
                "SELECT COUNT(*) FROM overtime WHERE IFNULL(status, '') NOT IN ({})",
                sql_list(&statuses)
            ),
        )?,
        bad_audit_status: count(
            conn,
            &format!(
                "SELECT COUNT(*) FROM overtime
                 WHERE IFNULL(audit_status, '') <> '' AND audit_status NOT IN ({})",
                sql_list(&audits)
            ),
        )?,
        negative_hours: count(conn, "SELECT COUNT(*) FROM overtime WHERE hours < 0")?,
        bad_duty_status: count(
            conn,
            &format!(
                "SELECT COUNT(*) FROM uncovered_duties WHERE status NOT IN ({})",
                sql_list(&duty_statuses)
            ),
        )?,
        bad_shift: count(
            conn,
            &format!(
                "SELECT COUNT(*) FROM uncovered_duties WHERE shift NOT IN ({})",
                sql_list(&shifts)
            ),
        )?,
        negative_uncovered: count(
            conn,
            "SELECT COUNT(*) FROM uncovered_duties WHERE hours_uncovered < 0",
        )?,
    })
}

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let has_overtime = table_exists(conn, "overtime")?;
    let overtime = if has_overtime {
        count(conn, "SELECT COUNT(*) FROM overtime")?
    } else {
        0
    };
    let duties = if table_exists(conn, "uncovered_duties")? {
        count(conn, "SELECT COUNT(*) FROM uncovered_duties")?
    } else {
        0
    };
    println!("{}• Overtime entries:{} {}{}{}", CYAN, RESET, GREEN, overtime, RESET);
    println!("{}• Uncovered duties:{} {}{}{}", CYAN, RESET, GREEN, duties, RESET);

    //
    // 3) DATE RANGE
    //
    let (first_date, last_date): (Option<String>, Option<String>) = if has_overtime {
        conn.query_row("SELECT MIN(date), MAX(date) FROM overtime", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
    } else {
        (None, None)
    };

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) SCHEMA VERSION
    //
    let applied = applied_migrations(conn)?;
    println!(
        "{}• Schema:{} {}/{} migrations applied",
        CYAN,
        RESET,
        applied.len(),
        MIGRATIONS.len()
    );
    for id in &applied {
        println!("    {GREEN}✔{RESET} {id}");
    }
    for m in MIGRATIONS.iter().filter(|m| !applied.iter().any(|a| a == m.id)) {
        println!("    {RED}✘{RESET} {} {GREY}(pending){RESET}", m.id);
    }

    println!();
    Ok(())
}
