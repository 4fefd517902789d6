//! Terminal renderings of the report chart payloads.

use crate::core::report::{Distribution, Trend};
use crate::utils::colors::{CYAN, GREY, MAGENTA, RESET};
use crate::utils::formatting::{format_hours, format_percent};
use unicode_width::UnicodeWidthStr;

const BAR_WIDTH: usize = 40;

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
    "█".repeat(len.min(BAR_WIDTH))
}

/// Horizontal bars, one per slice, labelled with hours and share.
pub fn render_distribution(dist: &Distribution) -> String {
    let label_w = dist
        .slices
        .iter()
        .map(|s| UnicodeWidthStr::width(s.label.as_str()))
        .max()
        .unwrap_or(0);
    let max = dist.slices.iter().map(|s| s.hours).fold(0.0, f64::max);

    let mut out = String::new();
    for s in &dist.slices {
        let fill = label_w.saturating_sub(UnicodeWidthStr::width(s.label.as_str()));
        out.push_str(&format!(
            "{}{} {CYAN}{:<w$}{RESET} {:>7}h {GREY}({}){RESET}\n",
            s.label,
            " ".repeat(fill),
            bar(s.hours, max),
            format_hours(s.hours),
            format_percent(s.proportion),
            w = BAR_WIDTH,
        ));
    }
    out
}

/// One bar per day, chronological.
pub fn render_trend(trend: &Trend) -> String {
    let max = trend.points.iter().map(|p| p.hours).fold(0.0, f64::max);

    let mut out = String::new();
    for p in &trend.points {
        out.push_str(&format!(
            "{} {MAGENTA}{:<w$}{RESET} {:>7}h\n",
            p.date.format("%Y-%m-%d"),
            bar(p.hours, max),
            format_hours(p.hours),
            w = BAR_WIDTH,
        ));
    }
    out
}
