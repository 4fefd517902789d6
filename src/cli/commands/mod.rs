pub mod add;
pub mod audit;
pub mod backup;
pub mod config;
pub mod db;
pub mod duty;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod report;

use crate::cli::parser::FilterArgs;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::ReportFilter;
use crate::utils::date::parse_date;

fn flag_date(value: &Option<String>) -> AppResult<Option<chrono::NaiveDate>> {
    match value {
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.clone())),
        None => Ok(None),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Turn the shared filter flags into a `ReportFilter`.
pub(crate) fn build_filter(args: &FilterArgs) -> AppResult<ReportFilter> {
    let mut filter = match args.range.as_deref() {
        Some(r) if !r.eq_ignore_ascii_case("all") => {
            let (from, to) = parse_range(r)?;
            ReportFilter::between(from, to)
        }
        _ => ReportFilter {
            from: flag_date(&args.from)?,
            to: flag_date(&args.to)?,
            ..ReportFilter::default()
        },
    };

    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from > to
    {
        return Err(AppError::InvalidRange(format!("{from} is after {to}")));
    }

    filter = filter
        .with_category(non_empty(&args.category))
        .with_department(non_empty(&args.department));
    Ok(filter)
}
