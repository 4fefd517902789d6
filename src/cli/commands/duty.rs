use crate::cli::commands::{build_filter, list};
use crate::cli::parser::{Commands, DutyAction};
use crate::config::Config;
use crate::core::TableKind;
use crate::core::duty::{DutyFields, DutyForm};
use crate::errors::AppResult;
use crate::store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Duty { action } = cmd {
        match action {
            DutyAction::Add {
                date,
                department,
                shift,
                hours,
                reason,
                status,
            } => {
                let mut form = DutyForm::new(DutyFields {
                    date: date.clone(),
                    department: department.clone(),
                    shift: shift.clone(),
                    hours_uncovered: *hours,
                    reason: reason.clone(),
                    status: status.clone(),
                });
                let mut store = store::open(cfg)?;
                form.submit(store.as_mut(), cfg)?;
            }
            DutyAction::List { filter, full } => {
                let filter = build_filter(filter)?;
                let mut store = store::open(cfg)?;
                list::print_records(store.as_mut(), cfg, TableKind::Duties, &filter, *full)?;
            }
        }
    }

    Ok(())
}
