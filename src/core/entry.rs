use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::overtime::{OvertimeEntry, week_bounds};
use crate::models::status::{EntryStatus, accepted};
use crate::store::{RecordStore, log_quietly};
use crate::ui::messages::{success, warning};
use crate::utils::date::{parse_date, parse_db_date};
use crate::utils::formatting::short_id;

/// Where a form is in its single pass from input to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitted,
    Persisted,
}

/// Raw values of the overtime entry form, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct OvertimeFields {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub date: String,
    pub hours: f64,
    pub category: String,
    pub approved_by: String,
    pub status: Option<String>,
    pub notes: String,
    pub week_start: Option<String>,
    pub week_end: Option<String>,
    pub roster_group: String,
    pub reviewed_by: String,
}

pub(crate) fn require(value: &str, field: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(v.to_string())
}

pub(crate) fn check_hours(hours: f64, field: &str) -> AppResult<f64> {
    if !hours.is_finite() {
        return Err(AppError::Validation(format!("{field} must be a number")));
    }
    if hours < 0.0 {
        return Err(AppError::Validation(format!(
            "{field} must be zero or more (got {hours})"
        )));
    }
    Ok(hours)
}

/// Accept only configured values (any case); an empty list accepts free text.
pub(crate) fn check_choice(allowed: &[String], value: &str, field: &str) -> AppResult<String> {
    Config::normalize_choice(allowed, value).ok_or_else(|| {
        AppError::Validation(format!(
            "{field} '{}' is not one of: {}",
            value.trim(),
            allowed.join(", ")
        ))
    })
}

pub(crate) fn check_date(value: &str, field: &str) -> AppResult<chrono::NaiveDate> {
    let v = require(value, field)?;
    parse_db_date(&v).ok_or(AppError::InvalidDate(v))
}

fn check_status(value: Option<&str>, cfg: &Config) -> AppResult<EntryStatus> {
    let raw = match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => cfg.default_status.as_str(),
    };
    EntryStatus::parse(raw).ok_or_else(|| {
        AppError::InvalidStatus(format!(
            "'{raw}' (expected one of: {})",
            accepted(&EntryStatus::ALL)
        ))
    })
}

fn optional_date(value: &Option<String>, field: &str) -> AppResult<Option<chrono::NaiveDate>> {
    match value {
        Some(s) if !s.trim().is_empty() => parse_date(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(format!("{field}: {s}"))),
        _ => Ok(None),
    }
}

/// Validate raw fields and build a new entry (fresh id, derived week bounds).
pub fn build_entry(fields: &OvertimeFields, cfg: &Config) -> AppResult<OvertimeEntry> {
    let employee_id = require(&fields.employee_id, "employee id")?;
    let date = check_date(&fields.date, "date")?;
    let hours = check_hours(fields.hours, "hours")?;
    let department = check_choice(&cfg.departments, &fields.department, "department")?;
    let category = check_choice(&cfg.categories, &fields.category, "category")?;
    let status = check_status(fields.status.as_deref(), cfg)?;

    let mut entry = OvertimeEntry::new(
        &employee_id,
        fields.name.trim(),
        &department,
        date,
        hours,
        &category,
        fields.approved_by.trim(),
        status,
        fields.notes.trim(),
    );

    let (derived_start, derived_end) = week_bounds(date);
    let week_start = optional_date(&fields.week_start, "week start")?.unwrap_or(derived_start);
    let week_end = optional_date(&fields.week_end, "week end")?.unwrap_or(derived_end);
    if week_start > week_end {
        return Err(AppError::Validation(format!(
            "week start {week_start} is after week end {week_end}"
        )));
    }

    entry.week_start = Some(week_start);
    entry.week_end = Some(week_end);
    entry.roster_group = fields.roster_group.trim().to_string();
    entry.reviewed_by = fields.reviewed_by.trim().to_string();
    Ok(entry)
}

/// Overtime entry form: Editing → Submitted → Persisted, once.
pub struct OvertimeForm {
    fields: OvertimeFields,
    state: FormState,
}

impl OvertimeForm {
    pub fn new(fields: OvertimeFields) -> Self {
        Self {
            fields,
            state: FormState::Editing,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn fields(&self) -> &OvertimeFields {
        &self.fields
    }

    pub fn validate(&self, cfg: &Config) -> AppResult<OvertimeEntry> {
        build_entry(&self.fields, cfg)
    }

    /// Persist one new record. Every call on a fresh form creates a new id,
    /// even when an identical entry already exists; that case only warns.
    pub fn submit(
        &mut self,
        store: &mut dyn RecordStore,
        cfg: &Config,
    ) -> AppResult<OvertimeEntry> {
        if self.state != FormState::Editing {
            return Err(AppError::FormAlreadySubmitted);
        }

        let entry = self.validate(cfg)?;
        self.state = FormState::Submitted;

        let existing = store.select_overtime()?;
        if let Some(dup) = existing.iter().find(|e| e.same_work_as(&entry)) {
            warning(format!(
                "Possible duplicate: entry {} already records {}h for {} on {}.",
                short_id(&dup.id),
                dup.hours,
                dup.employee_id,
                dup.date
            ));
        }

        store.insert_overtime(&entry)?;
        self.state = FormState::Persisted;

        log_quietly(
            store,
            "add",
            &entry.id,
            &format!(
                "{} {}h on {} ({})",
                entry.employee_id, entry.hours, entry.date, entry.category
            ),
        );
        success(format!("Entry saved successfully! (id {})", entry.id));

        Ok(entry)
    }
}
