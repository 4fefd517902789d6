use crate::cli::commands::build_filter;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::TableKind;
use crate::core::report::{duty_table, overtime_table};
use crate::errors::AppResult;
use crate::models::ReportFilter;
use crate::store::{self, RecordStore};
use crate::ui::messages::{header, info};
use crate::utils::formatting::format_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        table,
        filter,
        full,
    } = cmd
    {
        let filter = build_filter(filter)?;
        let mut store = store::open(cfg)?;
        print_records(store.as_mut(), cfg, *table, &filter, *full)?;
    }
    Ok(())
}

/// Print the filtered rows of one table, with a one-line total.
pub(crate) fn print_records(
    store: &mut dyn RecordStore,
    cfg: &Config,
    table: TableKind,
    filter: &ReportFilter,
    full: bool,
) -> AppResult<()> {
    let sep = cfg.separator_char.chars().next().unwrap_or('-');

    let (rendered, count, hours) = match table {
        TableKind::Overtime => {
            let rows = store.select_overtime_filtered(filter)?;
            let hours: f64 = rows.iter().map(|e| e.hours).sum();
            (overtime_table(&rows, full).render(sep), rows.len(), hours)
        }
        TableKind::Duties => {
            let rows = store.select_duties_filtered(filter)?;
            let hours: f64 = rows.iter().map(|d| d.hours_uncovered).sum();
            (duty_table(&rows, full).render(sep), rows.len(), hours)
        }
    };

    let title = match table {
        TableKind::Overtime => "Overtime entries",
        TableKind::Duties => "Uncovered duties",
    };
    header(format!("{title} ({})", filter.describe()));

    if count == 0 {
        info("No records found.");
        return Ok(());
    }

    print!("{rendered}");
    println!("\n{count} records, {} hours", format_hours(hours));
    Ok(())
}
