//! Reporting view: aggregates, chart payloads, tabular snapshot and pivot.

use crate::config::Config;
use crate::core::TableKind;
use crate::errors::{AppError, AppResult};
use crate::export::logic::ExportLogic;
use crate::export::model::{DutyExport, OvertimeExport};
use crate::export::ExportFormat;
use crate::models::{OvertimeEntry, ReportFilter, UncoveredDuty};
use crate::store::RecordStore;
use crate::ui::charts::{render_distribution, render_trend};
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_optional, colorize_status};
use crate::utils::formatting::{bold, format_hours, short_id};
use crate::utils::table::Table;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Department,
    Category,
}

/// Anything the reporting view can aggregate.
pub trait Reportable {
    fn date(&self) -> NaiveDate;
    fn hours(&self) -> f64;
    fn group_key(&self, by: GroupBy) -> String;
    /// Still waiting for action: a pending entry, an open duty.
    fn is_pending(&self) -> bool;
}

impl Reportable for OvertimeEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn hours(&self) -> f64 {
        self.hours
    }
    fn group_key(&self, by: GroupBy) -> String {
        match by {
            GroupBy::Department => self.department.clone(),
            GroupBy::Category => self.category.clone(),
        }
    }
    fn is_pending(&self) -> bool {
        OvertimeEntry::is_pending(self)
    }
}

impl Reportable for UncoveredDuty {
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn hours(&self) -> f64 {
        self.hours_uncovered
    }
    fn group_key(&self, by: GroupBy) -> String {
        match by {
            GroupBy::Department => self.department.clone(),
            GroupBy::Category => self.shift.to_string(),
        }
    }
    fn is_pending(&self) -> bool {
        self.is_open()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_hours: f64,
    pub total_entries: usize,
    pub pending_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub hours: f64,
    pub proportion: f64,
}

/// Share of hours per group (pie chart payload).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub group_by: GroupBy,
    pub slices: Vec<Slice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Daily totals in date order (line chart payload).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    pub summary: Summary,
    pub distribution: Distribution,
    pub trend: Trend,
}

pub fn summarize<T: Reportable>(rows: &[T]) -> Summary {
    Summary {
        total_hours: rows.iter().map(Reportable::hours).sum(),
        total_entries: rows.len(),
        pending_count: rows.iter().filter(|r| r.is_pending()).count(),
    }
}

/// Hour sums per group, ordered by label.
pub fn group_sums<T: Reportable>(rows: &[T], by: GroupBy) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for r in rows {
        *sums.entry(r.group_key(by)).or_insert(0.0) += r.hours();
    }
    sums.into_iter().collect()
}

pub fn distribution<T: Reportable>(rows: &[T], by: GroupBy) -> Distribution {
    let sums = group_sums(rows, by);
    let total: f64 = sums.iter().map(|(_, h)| h).sum();

    let slices = sums
        .into_iter()
        .map(|(label, hours)| Slice {
            proportion: if total > 0.0 { hours / total } else { 0.0 },
            label,
            hours,
        })
        .collect();

    Distribution {
        group_by: by,
        slices,
    }
}

pub fn daily_trend<T: Reportable>(rows: &[T]) -> Trend {
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in rows {
        *per_day.entry(r.date()).or_insert(0.0) += r.hours();
    }
    Trend {
        points: per_day
            .into_iter()
            .map(|(date, hours)| TrendPoint { date, hours })
            .collect(),
    }
}

pub fn build<T: Reportable>(rows: &[T], by: GroupBy) -> ReportModel {
    ReportModel {
        summary: summarize(rows),
        distribution: distribution(rows, by),
        trend: daily_trend(rows),
    }
}

/// Wide view: one row per date, one column per group, cells are hour sums.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub columns: Vec<String>,
    pub rows: Vec<(NaiveDate, Vec<f64>)>,
}

impl PivotTable {
    /// Back to long form, skipping empty cells.
    pub fn melt(&self) -> Vec<(NaiveDate, String, f64)> {
        let mut out = Vec::new();
        for (date, cells) in &self.rows {
            for (col, hours) in self.columns.iter().zip(cells) {
                if *hours != 0.0 {
                    out.push((*date, col.clone(), *hours));
                }
            }
        }
        out
    }

    pub fn to_table(&self) -> Table {
        let mut headers = vec!["date"];
        headers.extend(self.columns.iter().map(String::as_str));
        headers.push("total");

        let mut table = Table::with_headers(&headers, 16);
        for (date, cells) in &self.rows {
            let mut row = vec![date.to_string()];
            row.extend(cells.iter().map(|h| format_hours(*h)));
            row.push(format_hours(cells.iter().sum()));
            table.add_row(row);
        }
        table
    }
}

pub fn pivot<T: Reportable>(rows: &[T], by: GroupBy) -> PivotTable {
    let columns: Vec<String> = rows
        .iter()
        .map(|r| r.group_key(by))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut grid: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for r in rows {
        let cells = grid
            .entry(r.date())
            .or_insert_with(|| vec![0.0; columns.len()]);
        if let Ok(idx) = columns.binary_search(&r.group_key(by)) {
            cells[idx] += r.hours();
        }
    }

    PivotTable {
        columns,
        rows: grid.into_iter().collect(),
    }
}

/// Terminal table of overtime rows. Compact columns unless `full`.
pub fn overtime_table(rows: &[OvertimeEntry], full: bool) -> Table {
    if full {
        let mut table = Table::with_headers(OvertimeExport::HEADERS, 28);
        for e in rows {
            table.add_row(OvertimeExport::from(e).to_row());
        }
        return table;
    }

    let mut table = Table::with_headers(
        &[
            "id", "employee", "name", "department", "date", "hours", "category", "status",
            "audit", "notes",
        ],
        30,
    );
    for e in rows {
        table.add_row(vec![
            short_id(&e.id),
            e.employee_id.clone(),
            e.name.clone(),
            e.department.clone(),
            e.date_str(),
            format_hours(e.hours),
            e.category.clone(),
            colorize_status(e.status.to_db_str()),
            colorize_status(e.audit_status.to_db_str()),
            colorize_optional(&e.notes),
        ]);
    }
    table
}

pub fn duty_table(rows: &[UncoveredDuty], full: bool) -> Table {
    let mut table = Table::with_headers(DutyExport::HEADERS, 30);
    for d in rows {
        let mut row = DutyExport::from(d).to_row();
        if !full {
            row[0] = short_id(&d.id);
        }
        row[6] = colorize_status(d.status.to_db_str());
        table.add_row(row);
    }
    table
}

/// Options of the `report` command.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub table: TableKind,
    pub filter: ReportFilter,
    pub group_by: GroupBy,
    pub pivot: bool,
    pub full: bool,
    pub json: bool,
    pub export: Option<String>,
    pub format: Option<ExportFormat>,
    pub force: bool,
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn run(store: &mut dyn RecordStore, cfg: &Config, opts: &ReportOptions) -> AppResult<()> {
        match opts.table {
            TableKind::Overtime => {
                let rows = store.select_overtime_filtered(&opts.filter)?;
                Self::render(&rows, cfg, opts, "Overtime", overtime_table)?;
                if let Some(file) = &opts.export {
                    let snapshot: Vec<OvertimeExport> =
                        rows.iter().map(OvertimeExport::from).collect();
                    ExportLogic::write_snapshot(
                        &snapshot,
                        OvertimeExport::HEADERS,
                        opts.format.unwrap_or_default(),
                        file,
                        "overtime_data",
                        opts.force,
                    )?;
                }
            }
            TableKind::Duties => {
                let rows = store.select_duties_filtered(&opts.filter)?;
                Self::render(&rows, cfg, opts, "Uncovered duties", duty_table)?;
                if let Some(file) = &opts.export {
                    let snapshot: Vec<DutyExport> = rows.iter().map(DutyExport::from).collect();
                    ExportLogic::write_snapshot(
                        &snapshot,
                        DutyExport::HEADERS,
                        opts.format.unwrap_or_default(),
                        file,
                        "uncovered_duties_data",
                        opts.force,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn render<T: Reportable>(
        rows: &[T],
        cfg: &Config,
        opts: &ReportOptions,
        title: &str,
        to_table: fn(&[T], bool) -> Table,
    ) -> AppResult<()> {
        let model = build(rows, opts.group_by);

        if opts.json {
            let json = serde_json::to_string_pretty(&model)
                .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        header(format!("{title} report ({})", opts.filter.describe()));

        if rows.is_empty() {
            info("No data available");
            return Ok(());
        }

        let pending_label = match opts.table {
            TableKind::Overtime => "Pending Approvals",
            TableKind::Duties => "Open Duties",
        };
        println!(
            "{}: {}   {}: {}   {}: {}",
            bold("Total Hours"),
            format_hours(model.summary.total_hours),
            bold("Total Entries"),
            model.summary.total_entries,
            bold(pending_label),
            model.summary.pending_count
        );

        let sep = cfg.separator_char.chars().next().unwrap_or('-');
        let group_label = match (opts.table, opts.group_by) {
            (_, GroupBy::Department) => "Department",
            (TableKind::Overtime, GroupBy::Category) => "Category",
            (TableKind::Duties, GroupBy::Category) => "Shift",
        };

        header(format!("{group_label} Distribution"));
        print!("{}", render_distribution(&model.distribution));

        header("Daily Trend");
        print!("{}", render_trend(&model.trend));

        if opts.pivot {
            header(format!("Daily hours by {}", group_label.to_lowercase()));
            print!("{}", pivot(rows, opts.group_by).to_table().render(sep));
        }

        header("Detailed Records");
        print!("{}", to_table(rows, opts.full).render(sep));

        Ok(())
    }
}
