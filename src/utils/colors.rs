/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Color for a status label of any record kind:
/// approved / verified / covered → green, rejected / discrepancy → red,
/// pending / open → yellow, anything else → reset.
pub fn color_for_status(status: &str) -> &'static str {
    match status {
        "Approved" | "Verified" | "Covered" | "Resolved" => GREEN,
        "Rejected" | "Discrepancy" => RED,
        "Pending" | "Open" => YELLOW,
        "Cancelled" | "Unaudited" => GREY,
        _ => RESET,
    }
}

pub fn colorize_status(status: &str) -> String {
    format!("{}{}{}", color_for_status(status), status, RESET)
}

/// Returns GREY when the field is empty, and the value unchanged otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
