// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

fn bad(msg: &str, input: &str) -> AppError {
    AppError::InvalidRange(format!("{msg} in '{input}'"))
}

/// Parse a `--range` expression into inclusive date bounds.
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(bad("start and end must have the same format", r));
            }
            (first_day(s, r)?, last_day(e, r)?)
        }
        None => (first_day(r, r)?, last_day(r, r)?),
    };

    if start > end {
        return Err(bad("start is after end", r));
    }
    Ok((start, end))
}

fn year(part: &str, input: &str) -> AppResult<i32> {
    part.get(0..4)
        .and_then(|y| y.parse().ok())
        .ok_or_else(|| bad("invalid year", input))
}

fn month(part: &str, input: &str) -> AppResult<u32> {
    if part.as_bytes().get(4) != Some(&b'-') {
        return Err(bad("invalid month", input));
    }
    part.get(5..7)
        .and_then(|m| m.parse().ok())
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| bad("invalid month", input))
}

fn first_day(part: &str, input: &str) -> AppResult<NaiveDate> {
    match part.len() {
        4 => NaiveDate::from_ymd_opt(year(part, input)?, 1, 1),
        7 => NaiveDate::from_ymd_opt(year(part, input)?, month(part, input)?, 1),
        10 => NaiveDate::parse_from_str(part, "%Y-%m-%d").ok(),
        _ => return Err(bad("unsupported format", input)),
    }
    .ok_or_else(|| bad("invalid start date", input))
}

fn last_day(part: &str, input: &str) -> AppResult<NaiveDate> {
    match part.len() {
        4 => NaiveDate::from_ymd_opt(year(part, input)?, 12, 31),
        7 => {
            let (y, m) = (year(part, input)?, month(part, input)?);
            month_last_day(y, m).and_then(|d| NaiveDate::from_ymd_opt(y, m, d))
        }
        10 => NaiveDate::parse_from_str(part, "%Y-%m-%d").ok(),
        _ => return Err(bad("unsupported format", input)),
    }
    .ok_or_else(|| bad("invalid end date", input))
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

