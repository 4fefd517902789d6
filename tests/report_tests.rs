mod common;
use chrono::NaiveDate;
use common::{init_db_with_data, rov, setup_test_db, temp_out};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rovertime::core::report::{GroupBy, build, distribution, pivot, summarize};
use rovertime::export::json_csv::csv_string;
use rovertime::export::model::{CellValue, ExportRow};
use rovertime::export::range::parse_range;
use rovertime::export::{DutyExport, OvertimeExport};
use rovertime::models::{DutyStatus, EntryStatus, OvertimeEntry, ReportFilter, Shift, UncoveredDuty};
use rovertime::store::{MemoryStore, RecordStore};
use std::fs;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn entry(emp: &str, dept: &str, date: &str, hours: f64, cat: &str, st: EntryStatus) -> OvertimeEntry {
    OvertimeEntry::new(emp, "", dept, d(date), hours, cat, "", st, "")
}

fn sample_store() -> MemoryStore {
    let mut store = MemoryStore::default();
    store
        .insert_overtime(&entry("E1", "Operations", "2024-01-10", 5.0, "Regular", EntryStatus::Pending))
        .unwrap();
    store
        .insert_overtime(&entry("E2", "Engineering", "2024-01-20", 3.0, "Holiday", EntryStatus::Approved))
        .unwrap();
    store
}

#[test]
fn test_range_filter_selects_only_matching_rows() {
    let mut store = sample_store();
    let filter = ReportFilter::between(d("2024-01-01"), d("2024-01-15"));

    let rows = store.select_overtime_filtered(&filter).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].employee_id, "E1");

    let summary = summarize(&rows);
    assert_eq!(summary.total_hours, 5.0);
    assert_eq!(summary.total_entries, 1);
    assert_eq!(summary.pending_count, 1);
}

#[test]
fn test_distribution_and_trend() {
    let rows = vec![
        entry("E1", "Operations", "2024-01-10", 5.0, "Regular", EntryStatus::Pending),
        entry("E2", "Engineering", "2024-01-10", 3.0, "Holiday", EntryStatus::Approved),
        entry("E3", "Operations", "2024-01-12", 2.0, "Regular", EntryStatus::Rejected),
    ];

    let model = build(&rows, GroupBy::Department);
    assert_eq!(model.summary.total_hours, 10.0);
    assert_eq!(model.summary.pending_count, 1);

    let labels: Vec<&str> = model
        .distribution
        .slices
        .iter()
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Engineering", "Operations"]);
    assert_eq!(model.distribution.slices[1].hours, 7.0);
    let share: f64 = model.distribution.slices.iter().map(|s| s.proportion).sum();
    assert!((share - 1.0).abs() < 1e-9);

    let trend: Vec<(NaiveDate, f64)> = model.trend.points.iter().map(|p| (p.date, p.hours)).collect();
    assert_eq!(trend, vec![(d("2024-01-10"), 8.0), (d("2024-01-12"), 2.0)]);

    let by_cat = distribution(&rows, GroupBy::Category);
    assert_eq!(by_cat.slices[0].label, "Holiday");
    assert_eq!(by_cat.slices[1].hours, 7.0);
}

#[test]
fn test_empty_set_has_zero_metrics() {
    let rows: Vec<OvertimeEntry> = Vec::new();
    let model = build(&rows, GroupBy::Department);
    assert_eq!(model.summary.total_hours, 0.0);
    assert_eq!(model.summary.total_entries, 0);
    assert!(model.distribution.slices.is_empty());
    assert!(model.trend.points.is_empty());
}

#[test]
fn test_duties_report_counts_open_as_pending() {
    let duties = vec![
        UncoveredDuty::new(d("2024-02-03"), "HR", Shift::Night, 8.0, "", DutyStatus::Open),
        UncoveredDuty::new(d("2024-02-04"), "HR", Shift::Morning, 4.0, "", DutyStatus::Covered),
    ];
    let model = build(&duties, GroupBy::Category);
    assert_eq!(model.summary.total_hours, 12.0);
    assert_eq!(model.summary.pending_count, 1);
    assert_eq!(model.distribution.slices[0].label, "Morning");
}

#[test]
fn test_pivot_and_melt_agree() {
    let rows = vec![
        entry("E1", "Operations", "2024-01-10", 5.0, "Regular", EntryStatus::Pending),
        entry("E2", "Engineering", "2024-01-10", 3.0, "Holiday", EntryStatus::Approved),
        entry("E3", "Operations", "2024-01-10", 1.0, "Regular", EntryStatus::Approved),
        entry("E4", "Engineering", "2024-01-11", 2.0, "Regular", EntryStatus::Approved),
    ];

    let table = pivot(&rows, GroupBy::Department);
    assert_eq!(table.columns, vec!["Engineering", "Operations"]);
    assert_eq!(table.rows[0], (d("2024-01-10"), vec![3.0, 6.0]));
    assert_eq!(table.rows[1], (d("2024-01-11"), vec![2.0, 0.0]));

    let long = table.melt();
    assert_eq!(long.len(), 3);
    assert!(long.contains(&(d("2024-01-10"), "Operations".to_string(), 6.0)));
}

#[test]
fn test_csv_snapshot_reads_back_identically() {
    let mut store = sample_store();
    let mut tricky = entry("E3", "HR", "2024-01-11", 1.5, "Special", EntryStatus::Rejected);
    tricky.notes = "late train, \"again\"\nsecond line".to_string();
    store.insert_overtime(&tricky).unwrap();

    let snapshot: Vec<OvertimeExport> = store
        .select_overtime()
        .unwrap()
        .iter()
        .map(OvertimeExport::from)
        .collect();

    let text = csv_string(&snapshot, OvertimeExport::HEADERS).unwrap();
    assert!(text.starts_with("id,employee_id,name,department,date,hours,category"));

    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    let back: Vec<OvertimeExport> = rdr.deserialize().map(Result::unwrap).collect();
    assert_eq!(back, snapshot);
}

#[test]
fn test_spreadsheet_cells_keep_types_and_precision() {
    let mut e = entry("007", "HR", "2024-01-10", 2.25, "Regular", EntryStatus::Pending);
    e.id = "20230502101500".to_string();

    let cells = OvertimeExport::from(&e).cells();
    assert_eq!(cells.len(), OvertimeExport::HEADERS.len());
    assert_eq!(cells[0], CellValue::Text("20230502101500".to_string()));
    assert_eq!(cells[1], CellValue::Text("007".to_string()));
    assert_eq!(cells[4], CellValue::Date("2024-01-10".to_string()));
    assert_eq!(cells[5], CellValue::Number(2.25));

    let duty = UncoveredDuty::new(d("2024-02-03"), "HR", Shift::Night, 7.75, "", DutyStatus::Open);
    let cells = DutyExport::from(&duty).cells();
    assert_eq!(cells.len(), DutyExport::HEADERS.len());
    assert_eq!(cells[4], CellValue::Number(7.75));
}

#[test]
fn test_empty_duty_snapshot_still_has_header() {
    let text = csv_string::<DutyExport>(&[], DutyExport::HEADERS).unwrap();
    assert_eq!(
        text.trim_end(),
        "id,date,department,shift,hours_uncovered,reason,status,created_at"
    );
}

#[test]
fn test_parse_range_forms() {
    assert_eq!(parse_range("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
    assert_eq!(parse_range("2023").unwrap(), (d("2023-01-01"), d("2023-12-31")));
    assert_eq!(
        parse_range("2024-01-01:2024-01-15").unwrap(),
        (d("2024-01-01"), d("2024-01-15"))
    );
    assert!(parse_range("2024:2024-03").is_err());
    assert!(parse_range("24-1").is_err());
    assert!(parse_range("2024-05-01:2024-04-01").is_err());
}

#[test]
fn test_cli_report_filters_by_range() {
    let db_path = setup_test_db("report_cli_range");
    init_db_with_data(&db_path);

    rov()
        .args([
            "--db",
            &db_path,
            "report",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-15",
        ])
        .assert()
        .success()
        .stdout(contains("Total Hours").and(contains("5.0")))
        .stdout(contains("Pending Approvals"))
        .stdout(contains("E1"))
        .stdout(contains("E2").not());
}

#[test]
fn test_cli_report_json_payload() {
    let db_path = setup_test_db("report_cli_json");
    init_db_with_data(&db_path);

    let output = rov()
        .args(["--db", &db_path, "report", "--range", "2024-01", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let start = stdout.find('{').expect("json object");
    let value: serde_json::Value = serde_json::from_str(&stdout[start..]).expect("valid json");
    assert_eq!(value["summary"]["total_hours"], 8.0);
    assert_eq!(value["summary"]["total_entries"], 2);
    assert_eq!(value["summary"]["pending_count"], 1);
    assert_eq!(value["trend"]["points"][0]["date"], "2024-01-10");
}

#[test]
fn test_cli_report_without_data() {
    let db_path = setup_test_db("report_cli_empty");
    init_db_with_data(&db_path);

    rov()
        .args(["--db", &db_path, "report", "--range", "2030"])
        .assert()
        .success()
        .stdout(contains("No data available"));
}

#[test]
fn test_cli_report_exports_filtered_rows() {
    let db_path = setup_test_db("report_cli_export");
    init_db_with_data(&db_path);
    let out = temp_out("report_cli_export", "csv");

    rov()
        .args([
            "--db",
            &db_path,
            "report",
            "--range",
            "2024-01-01:2024-01-15",
            "--export",
            &out,
            "--format",
            "csv",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("E1"));
    assert!(!content.contains("E2"));
    assert_eq!(content.lines().count(), 2);
}
