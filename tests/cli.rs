mod common;

use common::{forecast_doc, opportunities_doc, opportunity, TestEnv};
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;

#[test]
fn generate_writes_programs_and_matrix() {
    let env = TestEnv::new();
    env.write(
        "opportunities.json",
        &opportunities_doc(vec![
            opportunity("a", "3DEP Elevation grant", "R&D", 50_000, "future"),
            opportunity("b", "LiDAR Data Subscription", "DaaS", 150_000_000, "urgent"),
            opportunity("c", "Satellite tasking", "R&D", 20_000_000, "near"),
            opportunity("d", "Terrain hosting", "Platform", 2_000_000_000, "future"),
        ]),
    );

    env.cmd().arg("generate").assert().success();

    let programs = env.read_json(&env.processed("programs.json"));
    assert_eq!(programs["meta"]["totalPrograms"], 4);
    assert_eq!(programs["programs"]["funding"][0]["id"], "a");
    assert_eq!(programs["programs"]["lidar"][0]["value"], "$150.0M");
    assert_eq!(programs["programs"]["spaceSystems"][0]["id"], "c");
    assert_eq!(programs["programs"]["platform"][0]["value"], "$2.00B");
    assert_eq!(programs["programs"]["platform"][0]["priorityScore"], 60);

    let csv = fs::read_to_string(env.processed("priority_matrix.csv")).unwrap();
    let ranked: Vec<(String, String)> = csv
        .lines()
        .skip(1)
        .map(|l| {
            let cols: Vec<&str> = l.split(',').collect();
            (cols[0].to_string(), cols[1].to_string())
        })
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("1".to_string(), "LiDAR Data Subscription".to_string()),
            ("2".to_string(), "Terrain hosting".to_string()),
            ("3".to_string(), "Satellite tasking".to_string()),
            ("4".to_string(), "3DEP Elevation grant".to_string()),
        ]
    );
}

#[test]
fn generate_aborts_on_missing_input() {
    let env = TestEnv::new();
    env.cmd()
        .arg("generate")
        .assert()
        .failure()
        .stderr(contains("Input file not found"));
    assert!(!env.processed("programs.json").exists());
    assert!(!env.processed("priority_matrix.csv").exists());
}

#[test]
fn generate_aborts_on_malformed_json() {
    let env = TestEnv::new();
    fs::write(env.data.join("opportunities.json"), "{\"opportunities\": [").unwrap();
    env.cmd()
        .arg("generate")
        .assert()
        .failure()
        .stderr(contains("Invalid JSON"));
    assert!(!env.processed("programs.json").exists());
}

#[test]
fn qc_passes_clean_inputs() {
    let env = TestEnv::new();
    env.write(
        "opportunities.json",
        &opportunities_doc(vec![opportunity("a", "LiDAR refresh", "DaaS", 5_000_000, "near")]),
    );
    env.write("forecast.json", &forecast_doc());

    env.cmd().arg("qc").assert().success();

    let report = env.read_json(&env.processed("qc_report.json"));
    assert_eq!(report["qc_status"], "PASS");
    assert_eq!(report["qc_percentage"], 100);
    assert_eq!(report["summary"], "QC PASSED with 0 errors and 0 warnings");
}

#[test]
fn qc_fails_on_total_count_mismatch() {
    let env = TestEnv::new();
    let mut doc = opportunities_doc(vec![opportunity("a", "LiDAR refresh", "DaaS", 5_000_000, "near")]);
    doc["meta"]["totalCount"] = json!(2);
    env.write("opportunities.json", &doc);
    env.write("forecast.json", &forecast_doc());

    env.cmd().arg("qc").assert().failure();

    let report = env.read_json(&env.processed("qc_report.json"));
    assert_eq!(report["qc_status"], "FAIL");
    assert_eq!(report["qc_percentage"], 0);
    assert_eq!(
        report["opportunities_validation"]["errors"],
        json!(["meta.totalCount (2) doesn't match actual count (1)"])
    );
}

#[test]
fn qc_records_missing_forecast_as_error() {
    let env = TestEnv::new();
    env.write(
        "opportunities.json",
        &opportunities_doc(vec![opportunity("a", "LiDAR refresh", "DaaS", 5_000_000, "near")]),
    );

    env.cmd().arg("qc").assert().failure();

    let report = env.read_json(&env.processed("qc_report.json"));
    assert_eq!(report["total_errors"], 1);
    let err = report["forecast_validation"]["errors"][0].as_str().unwrap();
    assert!(err.starts_with("Input file not found"), "{err}");
}

#[test]
fn all_runs_scrape_qc_and_generate() {
    let env = TestEnv::new();
    env.cmd().arg("all").assert().success();

    let opps = env.read_json(&env.data.join("opportunities.json"));
    let count = opps["opportunities"].as_array().unwrap().len();
    assert_eq!(count, 8);
    assert_eq!(opps["meta"]["totalCount"], 8);

    let forecast = env.read_json(&env.data.join("forecast.json"));
    assert_eq!(forecast["cagr_pct"], 19.43);

    let report = env.read_json(&env.processed("qc_report.json"));
    assert_eq!(report["qc_status"], "PASS");

    let programs = env.read_json(&env.processed("programs.json"));
    assert_eq!(programs["meta"]["totalPrograms"], 8);
}

#[test]
fn all_stops_before_generate_when_qc_fails() {
    let env = TestEnv::new();
    let config = env.write_config("[rules.validation]\nrequired_fields = [\"absent\"]\n");

    env.cmd().arg("--config").arg(&config).arg("all").assert().failure();

    // scrape ran, QC rejected it, generate never started
    assert!(env.data.join("opportunities.json").exists());
    let report = env.read_json(&env.processed("qc_report.json"));
    assert_eq!(report["qc_status"], "FAIL");
    assert_eq!(report["total_errors"], 8);
    assert!(!env.processed("programs.json").exists());
    assert!(!env.processed("priority_matrix.csv").exists());
}

#[test]
fn env_layer_moves_data_dir() {
    let env = TestEnv::new();
    let elsewhere = env.data.join("nested");
    std::fs::create_dir_all(&elsewhere).unwrap();

    // no --data-dir here, so the environment decides
    let mut cmd = assert_cmd::Command::cargo_bin("nuview-pipeline").unwrap();
    cmd.current_dir(&env.data)
        .env_remove("RUST_LOG")
        .env("NUVIEW_PATHS__DATA_DIR", &elsewhere)
        .env("NUVIEW_PATHS__PROCESSED_DIR", elsewhere.join("processed"))
        .arg("scrape")
        .assert()
        .success();

    assert!(elsewhere.join("opportunities.json").exists());
    assert!(elsewhere.join("forecast.json").exists());
}
