use super::duty::UncoveredDuty;
use super::overtime::OvertimeEntry;
use chrono::NaiveDate;

/// Caller-side selection applied after a full table scan.
///
/// Date bounds are inclusive on both ends; text filters match case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<String>,
    pub department: Option<String>,
}

impl ReportFilter {
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_department(mut self, department: Option<String>) -> Self {
        self.department = department;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none()
            && self.to.is_none()
            && self.category.is_none()
            && self.department.is_none()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|f| date >= f) && self.to.is_none_or(|t| date <= t)
    }

    pub fn matches_overtime(&self, e: &OvertimeEntry) -> bool {
        self.contains_date(e.date)
            && text_matches(&self.category, &e.category)
            && text_matches(&self.department, &e.department)
    }

    /// Duties have no category; a category filter is matched against the shift.
    pub fn matches_duty(&self, d: &UncoveredDuty) -> bool {
        self.contains_date(d.date)
            && text_matches(&self.category, d.shift.to_db_str())
            && text_matches(&self.department, &d.department)
    }

    /// Human readable description used in report titles.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        match (self.from, self.to) {
            (Some(f), Some(t)) if f == t => parts.push(format!("on {f}")),
            (Some(f), Some(t)) => parts.push(format!("from {f} to {t}")),
            (Some(f), None) => parts.push(format!("since {f}")),
            (None, Some(t)) => parts.push(format!("until {t}")),
            (None, None) => {}
        }
        if let Some(c) = &self.category {
            parts.push(format!("category {c}"));
        }
        if let Some(d) = &self.department {
            parts.push(format!("department {d}"));
        }
        if parts.is_empty() {
            "all records".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn text_matches(wanted: &Option<String>, value: &str) -> bool {
    match wanted {
        Some(w) => w.trim().eq_ignore_ascii_case(value.trim()),
        None => true,
    }
}
