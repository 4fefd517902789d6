#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rovertime::config::Config;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rov() -> Command {
    cargo_bin_cmd!("rovertime")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rovertime.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` to a CSV file in the temp dir and return its path
pub fn temp_csv(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_in.csv", name));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, content).expect("write temp csv");
    p
}

/// Configuration with the shipped defaults, pointing at `db_path`.
pub fn test_config(db_path: &str) -> Config {
    Config {
        database: db_path.to_string(),
        ..Config::default()
    }
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    rov()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rov()
        .args([
            "--db",
            db_path,
            "add",
            "--employee",
            "E1",
            "--name",
            "Ada",
            "--department",
            "Operations",
            "--date",
            "2024-01-10",
            "--hours",
            "5",
            "--category",
            "Regular",
            "--status",
            "Pending",
        ])
        .assert()
        .success();

    rov()
        .args([
            "--db",
            db_path,
            "add",
            "--employee",
            "E2",
            "--name",
            "Brian",
            "--department",
            "Engineering",
            "--date",
            "2024-01-20",
            "--hours",
            "3",
            "--category",
            "Holiday",
            "--status",
            "Approved",
        ])
        .assert()
        .success();
}
