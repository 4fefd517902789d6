mod common;
use common::{init_db_with_data, rov, setup_test_db, temp_out, test_config};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rovertime::db::migrate::table_columns;
use rovertime::models::AuditStatus;
use rovertime::store::{RecordStore, SqliteStore};
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::Path;

/// Full id of the first overtime entry, read back through a JSON export.
fn first_entry_id(db_path: &str, name: &str) -> String {
    let out = temp_out(name, "json");
    rov()
        .args(["--db", db_path, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let value: serde_json::Value = serde_json::from_str(&content).expect("json");
    value[0]["id"].as_str().expect("id").to_string()
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rov()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(Path::new(&db_path).exists());
}

#[test]
fn test_add_rejects_invalid_input() {
    let db_path = setup_test_db("cli_add_invalid");

    rov()
        .args([
            "--db",
            &db_path,
            "add",
            "--employee",
            "E1",
            "--department",
            "Operations",
            "--date",
            "2024-13-01",
            "--hours",
            "2",
            "--category",
            "Regular",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    rov()
        .args([
            "--db",
            &db_path,
            "add",
            "--employee",
            "E1",
            "--department",
            "Operations",
            "--date",
            "2024-01-01",
            "--hours",
            "-2",
            "--category",
            "Regular",
        ])
        .assert()
        .failure()
        .stderr(contains("hours must be zero or more"));
}

#[test]
fn test_add_warns_on_possible_duplicate() {
    let db_path = setup_test_db("cli_add_duplicate");
    init_db_with_data(&db_path);

    rov()
        .args([
            "--db",
            &db_path,
            "add",
            "--employee",
            "E1",
            "--department",
            "Operations",
            "--date",
            "2024-01-10",
            "--hours",
            "5",
            "--category",
            "Regular",
        ])
        .assert()
        .success()
        .stdout(contains("Possible duplicate"))
        .stdout(contains("Entry saved successfully"));

    let mut store = SqliteStore::open(&db_path).expect("open");
    assert_eq!(store.count_overtime().unwrap(), 3);
}

#[test]
fn test_list_shows_filtered_rows() {
    let db_path = setup_test_db("cli_list");
    init_db_with_data(&db_path);

    rov()
        .args(["--db", &db_path, "list", "--department", "engineering"])
        .assert()
        .success()
        .stdout(contains("E2"))
        .stdout(contains("Ada").not())
        .stdout(contains("1 records, 3.0 hours"));
}

#[test]
fn test_duty_add_and_list() {
    let db_path = setup_test_db("cli_duty");

    rov()
        .args([
            "--db",
            &db_path,
            "duty",
            "add",
            "--date",
            "2024-02-03",
            "--department",
            "HR",
            "--shift",
            "night",
            "--hours",
            "8",
            "--reason",
            "sick leave",
        ])
        .assert()
        .success()
        .stdout(contains("Uncovered duty saved successfully"));

    rov()
        .args(["--db", &db_path, "duty", "list", "--range", "2024-02"])
        .assert()
        .success()
        .stdout(contains("Night"))
        .stdout(contains("sick leave"))
        .stdout(contains("Open"));

    rov()
        .args([
            "--db", &db_path, "report", "--table", "duties", "--group-by", "category",
        ])
        .assert()
        .success()
        .stdout(contains("Open Duties"))
        .stdout(contains("Shift Distribution"));
}

#[test]
fn test_audit_updates_entry() {
    let db_path = setup_test_db("cli_audit");
    init_db_with_data(&db_path);
    let id = first_entry_id(&db_path, "cli_audit");

    rov()
        .args([
            "--db",
            &db_path,
            "audit",
            "--id",
            &id,
            "--status",
            "discrepancy",
            "--reviewed-by",
            "Auditor",
            "--comments",
            "roster shows 4h",
        ])
        .assert()
        .success()
        .stdout(contains("Audit recorded"));

    let mut store = SqliteStore::open(&db_path).expect("open");
    let e = store.find_overtime(&id).unwrap().expect("entry");
    assert_eq!(e.audit_status, AuditStatus::Discrepancy);
    assert_eq!(e.reviewed_by, "Auditor");
    assert_eq!(e.discrepancy_comments, "roster shows 4h");
}

#[test]
fn test_audit_unknown_id_fails() {
    let db_path = setup_test_db("cli_audit_unknown");
    init_db_with_data(&db_path);

    rov()
        .args([
            "--db", &db_path, "audit", "--id", "does-not-exist", "--status", "Verified",
        ])
        .assert()
        .failure()
        .stderr(contains("No entry found with id 'does-not-exist'"));
}

#[test]
fn test_export_csv_and_xlsx() {
    let db_path = setup_test_db("cli_export");
    init_db_with_data(&db_path);

    let csv_out = temp_out("cli_export", "csv");
    rov()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &csv_out, "--range", "2024-01",
        ])
        .assert()
        .success();
    let content = fs::read_to_string(&csv_out).expect("read csv");
    assert!(content.starts_with("id,employee_id,name,department,date,hours"));
    assert!(content.contains("2024-01-10"));
    assert!(content.contains("2024-01-20"));

    let xlsx_out = temp_out("cli_export", "xlsx");
    rov()
        .args([
            "--db", &db_path, "export", "--format", "xlsx", "--file", &xlsx_out,
        ])
        .assert()
        .success();
    assert!(fs::metadata(&xlsx_out).expect("xlsx written").len() > 0);
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("cli_export_relative");
    init_db_with_data(&db_path);

    rov()
        .args([
            "--db",
            &db_path,
            "export",
            "--format",
            "csv",
            "--file",
            "relative_output_file.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_existing_file_needs_force() {
    let db_path = setup_test_db("cli_export_force");
    init_db_with_data(&db_path);
    let out = temp_out("cli_export_force", "csv");
    fs::write(&out, "old").unwrap();

    rov()
        .args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&out).unwrap(), "old");

    rov()
        .args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("E1"));
}

#[test]
fn test_db_check_counts_out_of_range_values() {
    let db_path = setup_test_db("cli_db_check");
    init_db_with_data(&db_path);

    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute(
            "UPDATE overtime SET status = 'Unknown' WHERE employee_id = 'E2'",
            [],
        )
        .unwrap();
    }

    rov()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("1 rows hold values outside the allowed sets"));

    rov()
        .args(["--db", &db_path, "list"])
        .assert()
        .failure()
        .stderr(contains("Invalid status"));
}

#[test]
fn test_db_info_and_log() {
    let db_path = setup_test_db("cli_db_info");
    init_db_with_data(&db_path);

    rov()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Overtime entries:"))
        .stdout(contains("migrations applied"));

    rov()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("add"));
}

#[test]
fn test_db_info_leaves_legacy_schema_untouched() {
    let db_path = setup_test_db("cli_db_info_legacy");
    {
        let conn = Connection::open(&db_path).expect("open legacy");
        conn.execute_batch(
            r#"
            CREATE TABLE overtime (
                overtime_id TEXT PRIMARY KEY,
                employee_id TEXT,
                date        TEXT,
                hours       REAL,
                type        TEXT
            );
            INSERT INTO overtime VALUES ('legacy-1', 'E9', '2023-05-02', 2.5, 'Holiday');
            "#,
        )
        .expect("legacy schema");
    }

    rov()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Overtime entries:"))
        .stdout(contains("0/"))
        .stdout(contains("(pending)"));

    let conn = Connection::open(&db_path).expect("reopen");
    let cols = table_columns(&conn, "overtime").expect("columns");
    assert!(cols.iter().any(|c| c == "type"));
    assert!(!cols.iter().any(|c| c == "depot"));
    let logs: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'log'",
            [],
            |row| row.get(0),
        )
        .expect("sqlite_master");
    assert_eq!(logs, 0);
}

#[test]
fn test_init_keeps_existing_config_file() {
    let home = env::temp_dir().join("rovertime_init_home");
    fs::remove_dir_all(&home).ok();
    let conf_dir = home.join(".rovertime");
    fs::create_dir_all(&conf_dir).expect("config dir");
    let conf = conf_dir.join("rovertime.conf");
    fs::write(&conf, "departments: [Scheduling, OCC]\n").expect("write config");

    let db_path = setup_test_db("cli_init_keeps_config");
    rov()
        .env("HOME", &home)
        .args(["--db", &db_path, "init"])
        .assert()
        .success()
        .stdout(contains("Config file kept"));

    let content = fs::read_to_string(&conf).expect("read config");
    assert_eq!(content, "departments: [Scheduling, OCC]\n");
    assert!(Path::new(&db_path).exists());
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("cli_backup");
    init_db_with_data(&db_path);
    let out = temp_out("cli_backup", "sqlite");
    let zip_path = Path::new(&out).with_extension("zip");
    fs::remove_file(&zip_path).ok();

    rov()
        .args(["--db", &db_path, "backup", "--file", &out, "--compress"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(zip_path.exists());
    assert!(!Path::new(&out).exists());
}

#[test]
fn test_memory_store_keeps_nothing_between_runs() {
    let db_path = setup_test_db("cli_memory");

    rov()
        .args([
            "--db",
            &db_path,
            "--memory",
            "duty",
            "add",
            "--date",
            "2024-02-03",
            "--department",
            "HR",
            "--shift",
            "Morning",
            "--hours",
            "2",
        ])
        .assert()
        .success();

    rov()
        .args(["--db", &db_path, "--memory", "duty", "list"])
        .assert()
        .success()
        .stdout(contains("No records found."));

    assert!(!Path::new(&test_config(&db_path).database).exists());
}

#[test]
fn test_config_print() {
    rov()
        .args(["--test", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("departments"))
        .stdout(contains("default_status"));
}
