//! Table rendering utilities for CLI outputs.
//!
//! Widths are measured on the visible text (ANSI escapes stripped, wide
//! characters counted double) and long cells wrap inside their column.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));

pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

pub struct Column {
    pub header: String,
    /// Upper bound on the rendered width; longer cells wrap.
    pub max_width: usize,
}

impl Column {
    pub fn new(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_headers(headers: &[&str], max_width: usize) -> Self {
        Self::new(headers.iter().map(|h| Column::new(h, max_width)).collect())
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let longest = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| visible_width(c))
                    .max()
                    .unwrap_or(0);
                longest
                    .max(visible_width(&col.header))
                    .min(col.max_width.max(1))
            })
            .collect()
    }

    pub fn render(&self, separator: char) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad(&col.header, *w));
            out.push(' ');
        }
        out.push('\n');
        let total: usize = widths.iter().map(|w| w + 1).sum();
        out.push_str(&separator.to_string().repeat(total.saturating_sub(1)));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let cells: Vec<Vec<String>> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| wrap_cell(row.get(i).map(String::as_str).unwrap_or(""), *w))
                .collect();
            let height = cells.iter().map(Vec::len).max().unwrap_or(1);

            for line in 0..height {
                for (cell, w) in cells.iter().zip(&widths) {
                    let part = cell.get(line).map(String::as_str).unwrap_or("");
                    out.push_str(&pad(part, *w));
                    out.push(' ');
                }
                out.push('\n');
            }
        }

        out
    }
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(s));
    format!("{s}{}", " ".repeat(fill))
}

/// Coloured cells are short labels and are never wrapped.
fn wrap_cell(s: &str, width: usize) -> Vec<String> {
    if visible_width(s) <= width || s.contains('\x1b') {
        return vec![s.to_string()];
    }
    textwrap::wrap(s, width)
        .into_iter()
        .map(|l| l.into_owned())
        .collect()
}
