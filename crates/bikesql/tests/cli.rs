//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURE_SQL: &str = include_str!("fixtures/bikestores.sql");

/// Creates the fixture database for CLI testing.
fn create_test_db() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = temp.path().join("bikestores.db");
    let conn = rusqlite::Connection::open(&path).expect("Failed to create database");
    conn.execute_batch(FIXTURE_SQL)
        .expect("Failed to load fixture");
    (temp, path)
}

fn bikesql(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bikesql").unwrap();
    cmd.env_remove("BIKESQL_DATABASE")
        .args(["--db", db.to_str().unwrap()]);
    cmd
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("bikesql").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bike stores"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("bikesql").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bikesql"));
}

#[test]
fn test_list_command() {
    let mut cmd = Command::cargo_bin("bikesql").unwrap();
    cmd.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Products never ordered"))
        .stdout(predicate::str::contains("Total quantity sold per product"));
}

#[test]
fn test_tables_command() {
    let mut cmd = Command::cargo_bin("bikesql").unwrap();
    cmd.arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("order_items"))
        .stdout(predicate::str::contains("shipped_date"));
}

#[test]
fn test_list_csv() {
    let mut cmd = Command::cargo_bin("bikesql").unwrap();
    let output = cmd.args(["list", "--format", "csv"]).output().unwrap();
    assert!(output.status.success());

    let mut reader = csv::Reader::from_reader(output.stdout.as_slice());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 20);
    assert_eq!(&rows[17][0], "18");
    assert_eq!(&rows[17][1], "Products with brand and category");
}

#[test]
fn test_list_json_is_one_array() {
    let mut cmd = Command::cargo_bin("bikesql").unwrap();
    let output = cmd.args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be one JSON document");
    assert_eq!(parsed.as_array().map(Vec::len), Some(20));
}

#[test]
fn test_tables_json() {
    let mut cmd = Command::cargo_bin("bikesql").unwrap();
    let output = cmd.args(["tables", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be JSON");
    let orders = parsed
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "orders")
        .expect("orders table listed");
    let shipped = orders["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "shipped_date")
        .expect("shipped_date listed");
    assert_eq!(shipped["kind"], "DATE");
    assert_eq!(shipped["nullable"], true);
}

#[test]
fn test_tables_csv() {
    let mut cmd = Command::cargo_bin("bikesql").unwrap();
    cmd.args(["tables", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("table,column,kind,nullable,description"))
        .stdout(predicate::str::contains("orders,shipped_date,DATE,true,"));
}

#[test]
fn test_runs_all_reports() {
    let (_temp, db) = create_test_db();

    bikesql(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Customer names and email addresses"))
        .stdout(predicate::str::contains("debra.burks@yahoo.com"))
        .stdout(predicate::str::contains("20. Total quantity sold per product"));
}

#[test]
fn test_run_single_report() {
    let (_temp, db) = create_test_db();

    bikesql(&db)
        .args(["run", "14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Electra Girl's Hawaii 1"))
        .stdout(predicate::str::contains("Customer names").not());
}

#[test]
fn test_parameter_override() {
    let (_temp, db) = create_test_db();

    bikesql(&db)
        .args(["--product-id", "404", "run", "14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("product_id = 404"))
        .stdout(predicate::str::contains("(no data)"));
}

#[test]
fn test_run_out_of_range() {
    let (_temp, db) = create_test_db();

    bikesql(&db).args(["run", "21"]).assert().failure();
}

#[test]
fn test_json_output() {
    let (_temp, db) = create_test_db();

    let output = bikesql(&db)
        .args(["--format", "json", "run", "2"])
        .output()
        .expect("Failed to run bikesql");
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be JSON");
    assert_eq!(parsed[0]["report"], 2);
    assert_eq!(parsed[0]["rows"][0]["order_id"], 10);
    assert_eq!(parsed[0]["rows"][1]["customer_id"], 2);
}

#[test]
fn test_csv_output() {
    let (_temp, db) = create_test_db();

    bikesql(&db)
        .args(["--format", "csv", "run", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("store_id,order_count"))
        .stdout(predicate::str::contains("1,3"));
}

#[test]
fn test_check_command() {
    let (_temp, db) = create_test_db();

    bikesql(&db)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("matches the schema"));
}

#[test]
fn test_check_reports_mismatches() {
    let (_temp, db) = create_test_db();
    rusqlite::Connection::open(&db)
        .unwrap()
        .execute_batch("PRAGMA foreign_keys = OFF; DROP TABLE stocks; DROP TABLE brands;")
        .unwrap();

    bikesql(&db)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("table 'stocks' is missing"))
        .stdout(predicate::str::contains("table 'brands' is missing"));
}

#[test]
fn test_dropped_column_aborts_report() {
    let (_temp, db) = create_test_db();
    rusqlite::Connection::open(&db)
        .unwrap()
        .execute_batch("ALTER TABLE brands DROP COLUMN brand_name;")
        .unwrap();

    bikesql(&db)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("column 'brands.brand_name' is missing"));

    bikesql(&db)
        .args(["run", "18"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schema mismatch"));
}

#[test]
fn test_schema_mismatch_aborts_batch() {
    let (_temp, db) = create_test_db();
    rusqlite::Connection::open(&db)
        .unwrap()
        .execute_batch("DROP TABLE stocks;")
        .unwrap();

    bikesql(&db)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schema mismatch"));
}

#[test]
fn test_nonexistent_database() {
    let mut cmd = Command::cargo_bin("bikesql").unwrap();
    cmd.env_remove("BIKESQL_DATABASE")
        .args(["--db", "/nonexistent/bikestores.db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connectivity error"));
}
