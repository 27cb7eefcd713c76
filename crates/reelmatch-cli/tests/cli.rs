//! Integration tests for the `reelmatch` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const CATALOG: &str = "\
show_id,title,listed_in,description
s1,A,Drama,
s2,B,Drama,
s3,C,Comedy,
";

fn catalog_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write catalog");
    file
}

fn reelmatch() -> Command {
    let mut cmd = Command::cargo_bin("reelmatch").expect("binary built");
    cmd.env_remove("RUST_LOG").env("REELMATCH_LOGGING__LEVEL", "warn");
    cmd
}

#[test]
fn test_recommend_json() {
    let catalog = catalog_file(CATALOG);
    let output = reelmatch()
        .args(["--format", "json", "recommend", "--title", "A", "-k", "2", "--catalog"])
        .arg(catalog.path())
        .output()
        .expect("run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(json["query"], "A");
    assert_eq!(json["backend"], "cosine");
    let titles: Vec<&str> = json["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|i| i["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["B", "C"]);
}

#[test]
fn test_recommend_table_nearest_neighbor() {
    let catalog = catalog_file(CATALOG);
    reelmatch()
        .args(["recommend", "--title", "B", "--backend", "nn", "--catalog"])
        .arg(catalog.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("A").and(predicate::str::contains("nearest_neighbor")));
}

#[test]
fn test_unknown_title_fails() {
    let catalog = catalog_file(CATALOG);
    reelmatch()
        .args(["recommend", "--title", "Z", "--catalog"])
        .arg(catalog.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Title not found in catalog: 'Z'"));
}

#[test]
fn test_missing_column_fails() {
    let catalog = catalog_file("name,listed_in\nA,Drama\n");
    reelmatch()
        .args(["info", "--catalog"])
        .arg(catalog.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column: title"));
}

#[test]
fn test_invalid_backend_rejected() {
    let catalog = catalog_file(CATALOG);
    reelmatch()
        .args(["recommend", "--title", "A", "--backend", "annoy", "--catalog"])
        .arg(catalog.path())
        .assert()
        .failure();
}

#[test]
fn test_bench_json_reports_both_backends() {
    let catalog = catalog_file(CATALOG);
    let output = reelmatch()
        .args(["-f", "json", "bench", "--title", "A", "--runs", "3", "--catalog"])
        .arg(catalog.path())
        .output()
        .expect("run");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(json["runs"], 3);
    assert!(json["cosine_mean_secs"].as_f64().is_some());
    assert!(json["nearest_neighbor_mean_secs"].as_f64().is_some());
}

#[test]
fn test_bench_zero_runs_rejected() {
    let catalog = catalog_file(CATALOG);
    reelmatch()
        .args(["bench", "--title", "A", "--runs", "0", "--catalog"])
        .arg(catalog.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("runs must be > 0"));
}

#[test]
fn test_info_json() {
    let catalog = catalog_file(CATALOG);
    let output = reelmatch()
        .args(["--format", "json", "info", "--catalog"])
        .arg(catalog.path())
        .output()
        .expect("run");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(json["items"], 3);
    assert_eq!(json["vocabulary"], 2);
    assert_eq!(json["fingerprint"].as_str().map(str::len), Some(64));
}

#[test]
fn test_config_file_sets_default_k() {
    let catalog = catalog_file(CATALOG);
    let mut config = NamedTempFile::new().expect("temp file");
    writeln!(config, "[recommend]\ndefault_k = 1").expect("write config");

    let output = reelmatch()
        .arg("--config")
        .arg(config.path())
        .args(["-f", "json", "recommend", "--title", "A", "--catalog"])
        .arg(catalog.path())
        .output()
        .expect("run");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(json["items"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_missing_config_file_fails() {
    let catalog = catalog_file(CATALOG);
    reelmatch()
        .args(["--config", "/nonexistent/reelmatch.toml", "info", "--catalog"])
        .arg(catalog.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
