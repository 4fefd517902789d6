use crate::config::Config;
use crate::core::entry::{FormState, check_choice, check_date, check_hours};
use crate::errors::{AppError, AppResult};
use crate::models::duty::UncoveredDuty;
use crate::models::status::{DutyStatus, Shift, accepted};
use crate::store::{RecordStore, log_quietly};
use crate::ui::messages::success;

#[derive(Debug, Clone, Default)]
pub struct DutyFields {
    pub date: String,
    pub department: String,
    pub shift: String,
    pub hours_uncovered: f64,
    pub reason: String,
    pub status: Option<String>,
}

pub fn build_duty(fields: &DutyFields, cfg: &Config) -> AppResult<UncoveredDuty> {
    let date = check_date(&fields.date, "date")?;
    let department = check_choice(&cfg.departments, &fields.department, "department")?;
    let shift = Shift::parse(&fields.shift).ok_or_else(|| {
        AppError::InvalidShift(format!(
            "'{}' (expected one of: {})",
            fields.shift,
            accepted(&Shift::ALL)
        ))
    })?;
    let hours = check_hours(fields.hours_uncovered, "hours uncovered")?;
    let status = match fields.status.as_deref() {
        Some(s) if !s.trim().is_empty() => DutyStatus::parse(s).ok_or_else(|| {
            AppError::InvalidStatus(format!(
                "'{s}' (expected one of: {})",
                accepted(&DutyStatus::ALL)
            ))
        })?,
        _ => DutyStatus::Open,
    };

    Ok(UncoveredDuty::new(
        date,
        &department,
        shift,
        hours,
        fields.reason.trim(),
        status,
    ))
}

/// Uncovered duty form, same single-pass lifecycle as the overtime form.
pub struct DutyForm {
    fields: DutyFields,
    state: FormState,
}

impl DutyForm {
    pub fn new(fields: DutyFields) -> Self {
        Self {
            fields,
            state: FormState::Editing,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn submit(
        &mut self,
        store: &mut dyn RecordStore,
        cfg: &Config,
    ) -> AppResult<UncoveredDuty> {
        if self.state != FormState::Editing {
            return Err(AppError::FormAlreadySubmitted);
        }

        let duty = build_duty(&self.fields, cfg)?;
        self.state = FormState::Submitted;

        store.insert_duty(&duty)?;
        self.state = FormState::Persisted;

        log_quietly(
            store,
            "duty_add",
            &duty.id,
            &format!(
                "{} {} shift on {}: {}h uncovered",
                duty.department, duty.shift, duty.date, duty.hours_uncovered
            ),
        );
        success(format!("Uncovered duty saved successfully! (id {})", duty.id));

        Ok(duty)
    }
}
