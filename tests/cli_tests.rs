mod common;
use common::{Cell, Workspace, seed_store, write_workbook};
use calamine::{Reader, Xlsx, open_workbook};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

#[test]
fn init_creates_store_with_header() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.xlsx");

    ws.run_on(&store, &["init"])
        .assert()
        .success()
        .stdout(contains("Log file created"));
    assert!(ws.path("logs.xlsx").exists());

    // second init keeps the existing file
    ws.run_on(&store, &["init"])
        .assert()
        .success()
        .stdout(contains("already present").and(contains("0 records")));
}

#[test]
fn init_outside_test_mode_writes_config() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.csv");

    ws.rml()
        .args(["--file", &store, "init"])
        .assert()
        .success();

    let conf = fs::read_to_string(ws.path(".rmachlogger/rmachlogger.conf")).expect("config written");
    assert!(conf.contains("sheet_name: Logs"));
    assert!(conf.contains("default_shift: Morning"));
}

#[test]
fn add_reports_logged_hours() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.xlsx");

    ws.run_on(
        &store,
        &[
            "add", "2024-05-06", "-m", "CNC-1", "-p", "ProjA", "-o", "An", "--in", "08:00", "--out",
            "12:30",
        ],
    )
    .assert()
    .success()
    .stdout(contains("Logged 04h 30m").and(contains("CNC-1")));
}

#[test]
fn add_rejects_bad_input() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.xlsx");

    ws.run_on(&store, &["add", "2024-13-01", "-m", "M", "-p", "P", "-o", "O", "--hours", "1"])
        .assert()
        .failure()
        .stderr(contains("Error:"));

    ws.run_on(
        &store,
        &["add", "2024-01-01", "-m", "M", "-p", "P", "-o", "O", "--in", "10:00", "--out", "09:00"],
    )
    .assert()
    .failure()
    .stderr(contains("Error:"));

    ws.run_on(&store, &["add", "2024-01-01", "-m", "M", "-p", "P", "-o", "O", "-s", "brunch", "--hours", "1"])
        .assert()
        .failure()
        .stderr(contains("brunch"));

    assert!(!ws.path("logs.xlsx").exists());
}

#[test]
fn list_shows_filtered_records() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.xlsx");
    seed_store(&ws, &store);

    ws.run_on(&store, &["list"])
        .assert()
        .success()
        .stdout(contains("Filtered logs (3 records)").and(contains("Total hours: 9.00")));

    ws.run_on(&store, &["list", "--machine", "CNC-1", "--range", "2024-01-01"])
        .assert()
        .success()
        .stdout(
            contains("Filtered logs (1 records)")
                .and(contains("ProjA"))
                .and(contains("ProjB").not())
                .and(contains("Total hours: 4.00")),
        );

    ws.run_on(&store, &["list", "--shift", "afternoon"])
        .assert()
        .success()
        .stdout(contains("Robot").and(contains("Filtered logs (1 records)")));
}

#[test]
fn explicit_empty_selection_lists_nothing() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.xlsx");
    seed_store(&ws, &store);

    ws.run_on(&store, &["list", "--machine="])
        .assert()
        .success()
        .stdout(contains("No records match"));
}

#[test]
fn list_on_empty_store_warns() {
    let ws = Workspace::new();
    let store = ws.path_str("none.csv");

    ws.run_on(&store, &["list"])
        .assert()
        .success()
        .stdout(contains("No data found"));
}

#[test]
fn report_prints_default_summaries() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.xlsx");
    seed_store(&ws, &store);

    ws.run_on(&store, &["report"])
        .assert()
        .success()
        .stdout(
            contains("Machine usage from 2024-01-01 to 2024-01-02")
                .and(contains("Total Hours by Machine"))
                .and(contains("Total Hours by Project"))
                .and(contains("Total Hours by Operator"))
                .and(contains("Total: 9.00")),
        );
}

#[test]
fn report_custom_grouping_and_range() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.csv");
    seed_store(&ws, &store);

    ws.run_on(&store, &["report", "--by", "project,machine", "--range", "2024-01"])
        .assert()
        .success()
        .stdout(
            contains("Total Hours by Project / Machine")
                .and(contains("Records: 3 of 3"))
                .and(contains("44.4%")),
        );

    ws.run_on(&store, &["report", "--by", "colour"])
        .assert()
        .failure()
        .stderr(contains("colour"));

    ws.run_on(&store, &["report", "--range", "2024-03:2024-01"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn export_csv_json_xlsx_txt() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.xlsx");
    seed_store(&ws, &store);

    let csv_out = ws.path_str("out.csv");
    ws.run_on(&store, &["export", "--format", "csv", "--out", &csv_out, "--project", "ProjA"])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));
    let csv = fs::read_to_string(&csv_out).expect("read csv");
    assert!(csv.starts_with("Date,Machine,Project,Operator,Shift,Start,End,Hours,Notes"));
    assert_eq!(csv.lines().count(), 3);
    assert!(!csv.contains("ProjB"));

    let json_out = ws.path_str("out.json");
    ws.run_on(&store, &["export", "--format", "json", "--out", &json_out, "--by", "machine"])
        .assert()
        .success();
    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("read json")).expect("parse json");
    assert_eq!(doc["records"].as_array().map(Vec::len), Some(3));
    let summary = &doc["summaries"][0];
    assert_eq!(summary["group_by"][0], "Machine");
    assert_eq!(summary["groups"][0]["key"][0], "CNC-1");
    assert_eq!(summary["groups"][0]["hours"], 7.0);
    assert_eq!(summary["total"], 9.0);

    let xlsx_out = ws.path_str("out.xlsx");
    ws.run_on(&store, &["export", "--format", "xlsx", "--out", &xlsx_out])
        .assert()
        .success();
    assert!(fs::metadata(&xlsx_out).expect("xlsx written").len() > 0);

    let txt_out = ws.path_str("out.txt");
    ws.run_on(&store, &["export", "--format", "txt", "--out", &txt_out])
        .assert()
        .success();
    let txt = fs::read_to_string(&txt_out).expect("read txt");
    assert!(txt.contains("Hours by Machine"));
    assert!(!txt.contains('\x1b'));
}

#[test]
fn export_xlsx_with_repeated_grouping_gets_distinct_sheets() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.xlsx");
    seed_store(&ws, &store);

    let out = ws.path_str("repeat.xlsx");
    ws.run_on(
        &store,
        &["export", "--format", "xlsx", "--out", &out, "--by", "machine", "--by", "Machine"],
    )
    .assert()
    .success();

    let workbook: Xlsx<_> = open_workbook(&out).expect("open export");
    assert_eq!(
        workbook.sheet_names(),
        vec!["Logs".to_string(), "By Machine".to_string(), "By Machine (2)".to_string()]
    );
}

#[test]
fn list_explains_hidden_invalid_date_rows() {
    let ws = Workspace::new();
    let store = ws.path_str("mixed.csv");
    fs::write(
        &store,
        "Date,Machine,Project,Operator,Shift,Hours\n\
         2024-01-01,CNC-1,P,An,Morning,2\n\
         someday,CNC-1,P,An,Morning,3\n",
    )
    .expect("write csv");

    ws.run_on(&store, &["list"])
        .assert()
        .success()
        .stdout(
            contains("rows with an invalid date are hidden")
                .and(contains("Filtered logs (1 records)")),
        );
}

#[test]
fn export_refuses_overwrite_without_confirmation() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.xlsx");
    seed_store(&ws, &store);

    let out = ws.path_str("taken.csv");
    fs::write(&out, "keep me").expect("write");

    ws.run_on(&store, &["export", "--format", "csv", "--out", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("cancelled"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    ws.run_on(&store, &["export", "--format", "csv", "--out", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").starts_with("Date,"));
}

#[test]
fn ingest_prints_breakdown_and_exports() {
    let ws = Workspace::new();
    let workbook = ws.path("gia_cong.xlsx");
    write_workbook(
        &workbook,
        &[(
            "Phay",
            vec![
                vec![
                    Cell::Text("Mã dự án / Project code"),
                    Cell::Text("Tên máy / Machine name"),
                    Cell::Text("Tổng thời gian gia công (phút)"),
                ],
                vec![Cell::Text("P-01"), Cell::Text("M1"), Cell::Num(90.0)],
                vec![Cell::Text("P-02"), Cell::Text("M1"), Cell::Num(30.0)],
            ],
        )],
    );
    let workbook = workbook.to_string_lossy().to_string();
    let out = ws.path_str("breakdown.json");

    ws.rml()
        .args([
            "--test", "ingest", &workbook, "--project", "P-01", "--export", &out, "--format", "json",
        ])
        .assert()
        .success()
        .stdout(contains("Total Hours by Category").and(contains("1.50")));

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read json")).expect("parse json");
    assert_eq!(doc["records"].as_array().map(Vec::len), Some(1));
    assert_eq!(doc["records"][0]["Hours"], 1.5);
}

#[test]
fn unsupported_store_extension_fails() {
    let ws = Workspace::new();
    let store = ws.path_str("logs.ods");

    ws.run_on(&store, &["list"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}
