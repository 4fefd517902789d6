pub mod duty;
pub mod filter;
pub mod overtime;
pub mod status;

pub use duty::UncoveredDuty;
pub use filter::ReportFilter;
pub use overtime::OvertimeEntry;
pub use status::{AuditStatus, DutyStatus, EntryStatus, Shift};
