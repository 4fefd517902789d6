pub mod charts;
pub mod messages;
pub mod prompt;
