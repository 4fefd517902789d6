use chrono::{NaiveDate, NaiveDateTime};

/// Strict user input: `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Lenient parsing for stored and imported values.
///
/// Besides `YYYY-MM-DD` it accepts the `YYYY-MM-DD HH:MM:SS` / `T` forms that
/// dataframe-style writers leave behind, and `DD/MM/YYYY`.
pub fn parse_db_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(d) = parse_date(s) {
        return Some(d);
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Some(prefix) = s.get(0..10)
        && let Some(d) = parse_date(prefix)
    {
        return Some(d);
    }

    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

pub fn format_opt_date(d: Option<NaiveDate>) -> Option<String> {
    d.map(|d| d.format("%Y-%m-%d").to_string())
}
