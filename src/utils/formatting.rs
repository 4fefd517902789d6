//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Hours with one decimal, the way totals are shown everywhere.
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours)
}

/// Percentage with one decimal (`0.25` → `25.0%`).
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// First 8 characters of an id; full UUIDs are too wide for terminal tables.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
