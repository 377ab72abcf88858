//! CLI integration tests for the offline commands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sellersol() -> Command {
    Command::cargo_bin("sellersol").expect("binary builds")
}

#[test]
fn test_sample_writes_the_demo_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dummy.xlsx");

    sellersol()
        .args(["sample", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("dummy.xlsx"));

    assert!(path.exists());
}

#[test]
fn test_preview_prints_rows_from_the_sample() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dummy.xlsx");
    sellersol()
        .args(["sample", "--output"])
        .arg(&path)
        .assert()
        .success();

    sellersol()
        .arg("preview")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 baris"))
        .stdout(predicate::str::contains("Kopi Susu"));
}

#[test]
fn test_preview_rejects_a_non_spreadsheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("not_excel.xlsx");
    std::fs::write(&path, b"plain text").unwrap();

    sellersol().arg("preview").arg(&path).assert().failure();
}

#[test]
fn test_export_builds_a_report_without_network() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("dummy.xlsx");
    let narrative = dir.path().join("analisa.html");
    let report = dir.path().join("laporan.xlsx");

    sellersol()
        .args(["sample", "--output"])
        .arg(&data)
        .assert()
        .success();
    std::fs::write(&narrative, "<h3>Ringkasan</h3><p>Penjualan stabil.</p>").unwrap();

    sellersol()
        .arg("export")
        .arg(&data)
        .args(["--platform", "Shopee"])
        .arg("--narrative")
        .arg(&narrative)
        .arg("--output")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("laporan.xlsx"));

    assert!(report.exists());
}

#[test]
fn test_history_on_missing_file_reports_empty() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");

    sellersol()
        .arg("history")
        .arg("--history-file")
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("Belum ada riwayat"));
}
