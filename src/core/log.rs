use crate::db::log::LogRow;
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::ui::messages::info;
use crate::utils::table::{strip_ansi, visible_width};
use ansi_term::Colour;

const OP_WIDTH: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "duty_add" => Colour::Green,
        "import" => Colour::Cyan,
        "audit" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "migration_failed" => Colour::Red,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)` with only the operation coloured, cut to `OP_WIDTH`.
fn op_target(row: &LogRow) -> String {
    let color = color_for_operation(&row.operation);
    let plain = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };

    let visible = if plain.chars().count() > OP_WIDTH {
        let mut s: String = plain.chars().take(OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {rest}", color.paint(op)),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &mut dyn RecordStore) -> AppResult<()> {
        let rows = store.load_log()?;
        if rows.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        let id_w = rows
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(1);

        let dates: Vec<String> = rows
            .iter()
            .map(|r| {
                chrono::DateTime::parse_from_rfc3339(&r.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| r.date.clone())
            })
            .collect();
        let date_w = dates.iter().map(|d| d.len()).max().unwrap_or(10);

        let labels: Vec<String> = rows.iter().map(op_target).collect();
        let op_w = labels
            .iter()
            .map(|l| visible_width(l))
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH);

        println!("📜 Internal log:\n");

        for ((row, date), label) in rows.iter().zip(&dates).zip(&labels) {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(label).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id, date, label, padding, row.message
            );
        }

        Ok(())
    }
}
