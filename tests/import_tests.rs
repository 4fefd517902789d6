mod common;
use common::{rov, setup_test_db, temp_csv};
use predicates::str::contains;
use rovertime::config::Config;
use rovertime::core::TableKind;
use rovertime::core::import::{ImportLogic, normalize_header, read_sheet};
use rovertime::errors::AppError;
use rovertime::models::{AuditStatus, EntryStatus, Shift};
use rovertime::store::{MemoryStore, RecordStore, SqliteStore};

const GOOD: &str = "\
Employee ID,Name,Department,Date,Hours,Type,Status,Badge Colour
E1,Ada,Operations,2024-01-10,5,Regular,Pending,red
E2,Brian,engineering,2024-01-20,3.5,Holiday,approved,blue
";

#[test]
fn test_normalize_header() {
    assert_eq!(normalize_header(" Employee ID "), "employee_id");
    assert_eq!(normalize_header("\u{feff}Hours-Uncovered"), "hours_uncovered");
}

#[test]
fn test_import_appends_valid_rows() {
    let cfg = Config::default();
    let mut store = SqliteStore::in_memory().expect("store");

    let summary = ImportLogic::import_reader(&mut store, &cfg, GOOD.as_bytes(), TableKind::Overtime)
        .expect("import");

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.generated_ids, 2);
    assert_eq!(summary.ignored_columns, vec!["Badge Colour".to_string()]);

    let rows = store.select_overtime().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].employee_id, "E1");
    assert_eq!(rows[0].category, "Regular");
    assert_eq!(rows[1].department, "Engineering");
    assert_eq!(rows[1].status, EntryStatus::Approved);
    assert_eq!(rows[1].hours, 3.5);
    assert_eq!(rows[1].audit_status, AuditStatus::Unaudited);

    let log = store.load_log().unwrap();
    assert!(log.iter().any(|r| r.operation == "import"));
}

#[test]
fn test_one_bad_row_aborts_whole_import() {
    let csv = "\
employee_id,department,date,hours,category
E1,Operations,2024-01-10,5,Regular
E2,Operations,not-a-date,3,Regular
E3,Operations,2024-01-12,-2,Regular
";
    let cfg = Config::default();
    let mut store = MemoryStore::default();

    let err = ImportLogic::import_reader(&mut store, &cfg, csv.as_bytes(), TableKind::Overtime)
        .unwrap_err();

    match err {
        AppError::Import(msg) => {
            assert!(msg.contains("2 invalid row(s)"), "{msg}");
            assert!(msg.contains("line 3"), "{msg}");
            assert!(msg.contains("line 4"), "{msg}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.count_overtime().unwrap(), 0);
}

#[test]
fn test_missing_required_column_is_reported_up_front() {
    let csv = "employee_id,date\nE1,2024-01-10\n";
    let err = read_sheet(csv.as_bytes(), TableKind::Overtime).err().expect("error");
    assert!(matches!(err, AppError::Validation(ref m) if m.contains("hours")));
}

#[test]
fn test_two_columns_for_one_field_are_rejected_up_front() {
    let csv = "employee_id,date,hours,type,depot\nE1,2024-01-10,5,Regular,Holiday\n";
    let err = read_sheet(csv.as_bytes(), TableKind::Overtime).err().expect("error");
    match err {
        AppError::Validation(msg) => {
            assert!(msg.contains("'type'"), "{msg}");
            assert!(msg.contains("'depot'"), "{msg}");
            assert!(msg.contains("category"), "{msg}");
        }
        other => panic!("unexpected error: {other}"),
    }

    let csv = "id,overtime_id,employee_id,date,hours\na,b,E1,2024-01-10,5\n";
    let mut store = MemoryStore::default();
    let err = ImportLogic::import_reader(&mut store, &Config::default(), csv.as_bytes(), TableKind::Overtime);
    assert!(matches!(err, Err(AppError::Validation(_))));
    assert_eq!(store.count_overtime().unwrap(), 0);
}

#[test]
fn test_existing_id_makes_import_fail_atomically() {
    let cfg = Config::default();
    let mut store = MemoryStore::default();
    let csv = "\
id,employee_id,department,date,hours,category
fixed-1,E1,Operations,2024-01-10,5,Regular
";
    ImportLogic::import_reader(&mut store, &cfg, csv.as_bytes(), TableKind::Overtime).unwrap();

    let again = "\
id,employee_id,department,date,hours,category
new-1,E2,Operations,2024-01-11,1,Regular
fixed-1,E1,Operations,2024-01-10,5,Regular
";
    let err = ImportLogic::import_reader(&mut store, &cfg, again.as_bytes(), TableKind::Overtime);
    assert!(matches!(err, Err(AppError::DuplicateId(ref id)) if id == "fixed-1"));
    assert_eq!(store.count_overtime().unwrap(), 1);
}

#[test]
fn test_import_duties() {
    let csv = "\
date,department,shift,hours_uncovered,reason
2024-02-03,HR,Night,8,sick leave
2024-02-04,Finance,morning,4,
";
    let cfg = Config::default();
    let mut store = MemoryStore::default();

    let summary =
        ImportLogic::import_reader(&mut store, &cfg, csv.as_bytes(), TableKind::Duties).unwrap();
    assert_eq!(summary.rows, 2);

    let duties = store.select_duties().unwrap();
    assert_eq!(duties[1].shift, Shift::Morning);
    assert_eq!(duties[1].reason, "");
}

#[test]
fn test_cli_import_with_yes() {
    let db_path = setup_test_db("import_cli_yes");
    let csv = temp_csv("import_cli_yes", GOOD);

    rov()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rov()
        .args(["--db", &db_path, "import", "--file", &csv, "--yes"])
        .assert()
        .success()
        .stdout(contains("Ignoring unknown column(s): Badge Colour"))
        .stdout(contains("2 row(s) appended"));

    rov()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("E1"))
        .stdout(contains("E2"));
}

#[test]
fn test_cli_import_declined_writes_nothing() {
    let db_path = setup_test_db("import_cli_declined");
    let csv = temp_csv("import_cli_declined", GOOD);

    rov()
        .args(["--db", &db_path, "import", "--file", &csv])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Import cancelled"));

    rov()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No records found."));
}
