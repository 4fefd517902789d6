pub mod audit;
pub mod backup;
pub mod duty;
pub mod entry;
pub mod import;
pub mod log;
pub mod report;

use clap::ValueEnum;

/// The two record kinds the application stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    #[default]
    Overtime,
    Duties,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Overtime => "overtime",
            TableKind::Duties => "uncovered_duties",
        }
    }
}
