//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd to exercise main.rs code paths.
//!
//! # Coverage Exclusion
//! These tests are skipped during coverage runs.

#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

mod common;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_export(dir: &Path, name: &str, rows: Vec<Vec<Value>>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bank_export(&[sheet("Счет", &[AMOUNT, DATE], rows)])).unwrap();
    path
}

fn xlsx_files(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix) && n.ends_with(".xlsx"))
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("escrow-report"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("escrow-report"));
}

#[test]
fn test_analyze_help() {
    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    cmd.args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aggregate escrow inflows"));
}

// ═══════════════════════════════════════════════════════════════════════════
// ANALYZE COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_analyze_writes_results_workbook() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_export(
        temp_dir.path(),
        "Горизонт.xlsx",
        vec![
            vec![Number(1000.0), Text("01.03.2024")],
            vec![Number(500.5), Text("15.03.2024")],
        ],
    );
    let out_dir = temp_dir.path().join("out");

    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    cmd.arg("analyze")
        .arg(&input)
        .args(["--year", "2024", "--month", "3"])
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Поступления на счет Эскроу Горизонт"))
        .stdout(predicate::str::contains("1 500,50 руб."))
        .stdout(predicate::str::contains("за 2024-03"))
        .stdout(predicate::str::contains("Обработка завершена успешно"));

    assert_eq!(xlsx_files(&out_dir, "excel_results_2024_03_").len(), 1);
    assert!(xlsx_files(&out_dir, "errors_").is_empty());
}

#[test]
fn test_analyze_writes_errors_workbook() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("bad.xlsx");
    std::fs::write(&input, b"not a workbook").unwrap();

    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    cmd.arg("analyze")
        .arg(&input)
        .arg("--all-periods")
        .arg("--output-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("за весь период"))
        .stdout(predicate::str::contains("Ошибка при обработке"));

    assert_eq!(xlsx_files(temp_dir.path(), "errors_all_period_").len(), 1);
    assert!(xlsx_files(temp_dir.path(), "excel_results_").is_empty());
}

#[test]
fn test_analyze_json_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_export(
        temp_dir.path(),
        "a.xlsx",
        vec![vec![Number(42.0), Text("2023-12-31")]],
    );

    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    let output = cmd
        .arg("analyze")
        .arg(&input)
        .args(["--all-periods", "--format", "json", "--dry-run"])
        .arg("--output-dir")
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report["results"][0]["object_name"],
        "Поступления на счет Эскроу a"
    );
    assert_eq!(report["results"][0]["formatted_amount"], "42,00 руб.");
    assert_eq!(report["errors"].as_array().unwrap().len(), 0);
    assert!(xlsx_files(temp_dir.path(), "excel_results_").is_empty());
}

#[test]
fn test_analyze_rejects_bad_month() {
    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    cmd.args(["analyze", "x.xlsx", "--month", "13"])
        .assert()
        .failure();
}

#[test]
fn test_analyze_period_conflicts_with_all_periods() {
    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    cmd.args(["analyze", "x.xlsx", "--month", "3", "--all-periods"])
        .assert()
        .failure();
}

#[test]
fn test_analyze_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    cmd.arg("analyze")
        .arg(temp_dir.path().join("nope.xlsx"))
        .arg("--dry-run")
        .assert()
        .failure();
}

#[test]
fn test_analyze_permits_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let permits = temp_dir.path().join("permits.yaml");
    std::fs::write(&permits, "\"77-1\": Объект из файла\n").unwrap();

    let input = temp_dir.path().join("p.xlsx");
    std::fs::write(
        &input,
        bank_export(&[sheet(
            "Счет",
            &[AMOUNT, DATE, PERMIT],
            vec![vec![Number(9.0), Text("01.03.2024"), Text("77-1")]],
        )]),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    cmd.env("ESCROW_REPORT_PERMITS", &permits)
        .arg("analyze")
        .arg(&input)
        .args(["--all-periods", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Объект из файла"))
        .stdout(predicate::str::contains("9,00 руб."));
}

// ═══════════════════════════════════════════════════════════════════════════
// PERMITS COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_permits_builtin_table() {
    let mut cmd = Command::cargo_bin("escrow-report").unwrap();
    cmd.env_remove("ESCROW_REPORT_PERMITS")
        .arg("permits")
        .assert()
        .success()
        .stdout(predicate::str::contains("91-RU93308000-2132-2022"))
        .stdout(predicate::str::contains("Горизонт 3"))
        .stdout(predicate::str::contains("3 permits"));
}
