use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary approval status of an overtime entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EntryStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl EntryStatus {
    pub const ALL: [EntryStatus; 3] = [
        EntryStatus::Pending,
        EntryStatus::Approved,
        EntryStatus::Rejected,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "Pending",
            EntryStatus::Approved => "Approved",
            EntryStatus::Rejected => "Rejected",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(EntryStatus::Pending),
            "Approved" => Some(EntryStatus::Approved),
            "Rejected" => Some(EntryStatus::Rejected),
            _ => None,
        }
    }

    /// Helper: parse user input (any case)
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.to_db_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// Secondary review state tracked next to the primary status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AuditStatus {
    #[default]
    Unaudited,
    Verified,
    Discrepancy,
    Resolved,
}

impl AuditStatus {
    pub const ALL: [AuditStatus; 4] = [
        AuditStatus::Unaudited,
        AuditStatus::Verified,
        AuditStatus::Discrepancy,
        AuditStatus::Resolved,
    ];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            AuditStatus::Unaudited => "Unaudited",
            AuditStatus::Verified => "Verified",
            AuditStatus::Discrepancy => "Discrepancy",
            AuditStatus::Resolved => "Resolved",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Unaudited" => Some(AuditStatus::Unaudited),
            "Verified" => Some(AuditStatus::Verified),
            "Discrepancy" => Some(AuditStatus::Discrepancy),
            "Resolved" => Some(AuditStatus::Resolved),
            _ => None,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.to_db_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// Lifecycle of an uncovered duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DutyStatus {
    #[default]
    Open,
    Covered,
    Cancelled,
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 3] = [DutyStatus::Open, DutyStatus::Covered, DutyStatus::Cancelled];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            DutyStatus::Open => "Open",
            DutyStatus::Covered => "Covered",
            DutyStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Open" => Some(DutyStatus::Open),
            "Covered" => Some(DutyStatus::Covered),
            "Cancelled" => Some(DutyStatus::Cancelled),
            _ => None,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.to_db_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Night];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Morning" => Some(Shift::Morning),
            "Afternoon" => Some(Shift::Afternoon),
            "Night" => Some(Shift::Night),
            _ => None,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.to_db_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// Comma separated list of the accepted values, used in error messages.
pub fn accepted<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
