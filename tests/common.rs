#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rmachlogger::models::{LogRow, LogTable, Parsed};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch HOME plus room for store and export files.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn path_str(&self, name: &str) -> String {
        self.path(name).to_string_lossy().to_string()
    }

    /// The binary with HOME redirected, so no real config file is read.
    pub fn rml(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rmachlogger");
        cmd.env("HOME", self.dir.path())
            .env("APPDATA", self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    /// `rmachlogger --file <store> --test <args...>`
    pub fn run_on(&self, store: &str, args: &[&str]) -> Command {
        let mut cmd = self.rml();
        cmd.args(["--file", store, "--test"]).args(args);
        cmd
    }
}

/// Three records spread over two machines, two projects and two dates.
pub fn seed_store(ws: &Workspace, store: &str) {
    ws.run_on(store, &["init"]).assert().success();

    ws.run_on(
        store,
        &[
            "add", "2024-01-01", "-m", "CNC-1", "-p", "ProjA", "-o", "An", "-s", "Morning", "--in",
            "07:00", "--out", "11:00",
        ],
    )
    .assert()
    .success();

    ws.run_on(
        store,
        &[
            "add", "2024-01-01", "-m", "Robot", "-p", "ProjA", "-o", "Binh", "-s", "ca 2",
            "--hours", "2",
        ],
    )
    .assert()
    .success();

    ws.run_on(
        store,
        &[
            "add", "2024-01-02", "-m", "CNC-1", "-p", "ProjB", "-o", "An", "-s", "Night",
            "--hours", "3", "--notes", "tool change",
        ],
    )
    .assert()
    .success();
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn row(d: &str, machine: &str, project: &str, hours: Parsed<f64>) -> LogRow {
    LogRow {
        line: 0,
        date: Parsed::Value(date(d)),
        machine: machine.to_string(),
        project: project.to_string(),
        operator: "An".to_string(),
        shift: "Morning".to_string(),
        start: Parsed::Missing,
        end: Parsed::Missing,
        hours,
        notes: String::new(),
        span_error: false,
    }
}

/// The three-row table used throughout the engine tests.
pub fn scenario_table() -> LogTable {
    LogTable::new(vec![
        row("2024-01-01", "CNC-1", "ProjA", Parsed::Value(4.0)),
        row("2024-01-01", "Robot", "ProjA", Parsed::Value(2.0)),
        row("2024-01-02", "CNC-1", "ProjB", Parsed::Value(3.0)),
    ])
}

/// Fixture cell for `write_workbook`.
pub enum Cell<'a> {
    Text(&'a str),
    Num(f64),
    Blank,
}

/// Build an .xlsx file with the given sheets, each a list of rows.
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Cell>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).expect("sheet name");
        for (r, cells) in rows.iter().enumerate() {
            for (c, cell) in cells.iter().enumerate() {
                match cell {
                    Cell::Text(s) => {
                        sheet.write_string(r as u32, c as u16, *s).expect("write string");
                    }
                    Cell::Num(n) => {
                        sheet.write_number(r as u32, c as u16, *n).expect("write number");
                    }
                    Cell::Blank => {}
                }
            }
        }
    }
    workbook.save(path).expect("save workbook");
}
