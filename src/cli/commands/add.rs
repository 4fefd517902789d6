use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entry::{OvertimeFields, OvertimeForm};
use crate::errors::AppResult;
use crate::store;

/// Record one overtime entry through the entry form.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        employee,
        name,
        department,
        date,
        hours,
        category,
        status,
        approved_by,
        notes,
        roster_group,
        week_start,
        week_end,
        reviewed_by,
    } = cmd
    {
        let fields = OvertimeFields {
            employee_id: employee.clone(),
            name: name.clone(),
            department: department.clone(),
            date: date.clone(),
            hours: *hours,
            category: category.clone(),
            approved_by: approved_by.clone(),
            status: status.clone(),
            notes: notes.clone(),
            week_start: week_start.clone(),
            week_end: week_end.clone(),
            roster_group: roster_group.clone(),
            reviewed_by: reviewed_by.clone(),
        };

        // Validate before touching the database.
        let mut form = OvertimeForm::new(fields);
        form.validate(cfg)?;

        let mut store = store::open(cfg)?;
        form.submit(store.as_mut(), cfg)?;
    }

    Ok(())
}
