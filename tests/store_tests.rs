mod common;
use common::{Cell, Workspace, date, write_workbook};
use chrono::NaiveTime;
use rmachlogger::errors::AppError;
use rmachlogger::models::{LogRecord, LogRow, Parsed, Shift};
use rmachlogger::store::{self, LogStore};

fn record(machine: &str, hours: Option<f64>) -> LogRecord {
    LogRecord::new(
        date("2024-03-04"),
        machine,
        "Dự án A",
        "Nguyễn Văn An",
        Shift::Afternoon,
        NaiveTime::from_hms_opt(13, 0, 0),
        NaiveTime::from_hms_opt(16, 30, 0),
        hours,
        Some("spindle check".to_string()),
    )
    .expect("valid record")
}

fn assert_same_record(row: &LogRow, r: &LogRecord) {
    assert_eq!(row.to_record().as_ref(), Some(r));
}

#[test]
fn missing_store_loads_empty() {
    let ws = Workspace::new();
    for name in ["absent.xlsx", "absent.csv"] {
        let s = store::open(&ws.path(name), "Logs").expect("open store");
        assert!(!s.exists());
        assert!(s.load().expect("load").is_empty());
    }
}

#[test]
fn xlsx_append_then_load_round_trip() {
    let ws = Workspace::new();
    let s = store::open(&ws.path("logs.xlsx"), "Logs").expect("open store");

    let first = record("CNC-1", None);
    let second = record("Robot", Some(2.5));
    s.append(&first).expect("append first");
    s.append(&second).expect("append second");

    let table = s.load().expect("load");
    assert_eq!(table.len(), 2);
    assert_eq!(first.hours, 3.5);
    assert_same_record(&table.rows()[0], &first);
    assert_same_record(&table.rows()[1], &second);
    assert!(!ws.path(".logs.xlsx.tmp").exists());
}

#[test]
fn csv_append_then_load_round_trip() {
    let ws = Workspace::new();
    let s = store::open(&ws.path("logs.csv"), "Logs").expect("open store");

    let r = record("Máy phay 3", None);
    s.append(&r).expect("append");

    let table = s.load().expect("load");
    assert_eq!(table.len(), 1);
    assert_same_record(&table.rows()[0], &r);

    let raw = std::fs::read_to_string(ws.path("logs.csv")).expect("read csv");
    assert!(raw.starts_with("Date,Machine,Project,Operator,Shift,Start,End,Hours,Notes"));
    assert!(raw.contains("2024-03-04"));
}

#[test]
fn custom_sheet_name_is_used() {
    let ws = Workspace::new();
    let path = ws.path("custom.xlsx");
    let s = store::open(&path, "Usage").expect("open store");
    s.append(&record("CNC-1", None)).expect("append");

    assert_eq!(store::open(&path, "Usage").unwrap().load().unwrap().len(), 1);
    let err = store::open(&path, "Logs").unwrap().load().unwrap_err();
    assert!(matches!(err, AppError::Store { .. }));
}

#[test]
fn unsupported_extension_is_rejected() {
    let ws = Workspace::new();
    let err = store::open(&ws.path("logs.txt"), "Logs").err().expect("must fail");
    assert!(matches!(err, AppError::UnsupportedStore(_)));
}

#[test]
fn schema_error_names_missing_columns() {
    let ws = Workspace::new();
    let path = ws.path("partial.xlsx");
    write_workbook(
        &path,
        &[(
            "Logs",
            vec![
                vec![Cell::Text("Date"), Cell::Text("Machine"), Cell::Text("Notes")],
                vec![Cell::Text("2024-01-01"), Cell::Text("CNC-1"), Cell::Blank],
            ],
        )],
    );

    let err = store::open(&path, "Logs").unwrap().load().unwrap_err();
    match &err {
        AppError::Schema { missing, .. } => {
            assert_eq!(missing, &vec!["Project", "Operator", "Shift", "Hours"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    let msg = err.to_string();
    assert!(msg.contains("Project, Operator, Shift, Hours"));
}

#[test]
fn vietnamese_headers_resolve_and_bad_cells_stay_on_the_row() {
    let ws = Workspace::new();
    let path = ws.path("nhat_ky.xlsx");
    write_workbook(
        &path,
        &[(
            "Logs",
            vec![
                vec![
                    Cell::Text("Ngày"),
                    Cell::Text("Tên máy"),
                    Cell::Text("Mã dự án / Project code"),
                    Cell::Text("Người vận hành"),
                    Cell::Text("Ca"),
                    Cell::Text("Số giờ (h)"),
                ],
                vec![
                    Cell::Text("02/01/2024"),
                    Cell::Text("CNC-1"),
                    Cell::Text("P-01"),
                    Cell::Text("Bình"),
                    Cell::Text("Ca sáng"),
                    Cell::Num(4.0),
                ],
                vec![Cell::Blank, Cell::Blank, Cell::Blank, Cell::Blank, Cell::Blank, Cell::Blank],
                vec![
                    Cell::Text("03/01/2024"),
                    Cell::Text("CNC-2"),
                    Cell::Text("P-01"),
                    Cell::Text("Bình"),
                    Cell::Text("Ca đêm"),
                    Cell::Text("N/A"),
                ],
            ],
        )],
    );

    let table = store::open(&path, "Logs").unwrap().load().expect("load");
    assert_eq!(table.len(), 2);

    let first = &table.rows()[0];
    assert_eq!(first.date.get(), Some(date("2024-01-02")));
    assert_eq!(first.machine, "CNC-1");
    assert_eq!(first.project, "P-01");
    assert_eq!(first.operator, "Bình");
    assert_eq!(first.shift, "Morning");
    assert_eq!(first.hours.get(), Some(4.0));

    let second = &table.rows()[1];
    assert_eq!(second.shift, "Night");
    assert_eq!(second.hours, Parsed::Invalid("N/A".to_string()));
    assert_eq!(table.invalid_rows(), 1);
    assert_eq!(table.total_hours(), 4.0);
}

#[test]
fn hours_derived_from_start_and_end_columns() {
    let ws = Workspace::new();
    let path = ws.path("span.csv");
    std::fs::write(
        &path,
        "\u{feff}Date,Machine,Project,Operator,Shift,Start,End\n\
         2024-01-05,Lathe,P-9,An,Morning,08:00,10:30\n\
         2024-01-05,Lathe,P-9,An,Morning,10:00,09:00\n",
    )
    .expect("write csv");

    let table = store::open(&path, "Logs").unwrap().load().expect("load");
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0].hours.get(), Some(2.5));
    assert!(table.rows()[1].hours.is_missing());
    assert!(table.rows()[1].span_error);
    assert_eq!(table.invalid_rows(), 1);
}

#[test]
fn rewrite_keeps_blank_hours_of_reversed_span() {
    let ws = Workspace::new();
    let path = ws.path("reversed.csv");
    std::fs::write(
        &path,
        "Date,Machine,Project,Operator,Shift,Start,End,Hours,Notes\n\
         2024-01-01,CNC,P,An,Morning,10:00,08:00,,\n",
    )
    .expect("write csv");

    let s = store::open(&path, "Logs").expect("open store");
    s.append(&record("Robot", Some(1.0))).expect("append");

    let raw = std::fs::read_to_string(&path).expect("read csv");
    assert!(raw.contains("2024-01-01,CNC,P,An,Morning,10:00,08:00,,\n"));

    let table = s.load().expect("load");
    assert_eq!(table.len(), 2);
    assert!(table.rows()[0].span_error);
    assert!(table.rows()[0].hours.is_missing());
}

#[test]
fn times_with_seconds_survive_round_trip() {
    let ws = Workspace::new();
    let r = LogRecord::new(
        date("2024-03-04"),
        "CNC-1",
        "P-1",
        "An",
        Shift::Morning,
        NaiveTime::from_hms_opt(8, 0, 30),
        NaiveTime::from_hms_opt(9, 30, 0),
        None,
        None,
    )
    .expect("valid record");

    for name in ["secs.csv", "secs.xlsx"] {
        let s = store::open(&ws.path(name), "Logs").expect("open store");
        s.append(&r).expect("append");

        let table = s.load().expect("load");
        assert_eq!(table.len(), 1, "{name}");
        assert_eq!(table.rows()[0].start.get(), NaiveTime::from_hms_opt(8, 0, 30), "{name}");
        assert_same_record(&table.rows()[0], &r);
    }

    let raw = std::fs::read_to_string(ws.path("secs.csv")).expect("read csv");
    assert!(raw.contains(",08:00:30,09:30,"));
}

#[test]
fn record_validation() {
    let d = date("2024-01-01");
    let nine = NaiveTime::from_hms_opt(9, 0, 0);
    let eight = NaiveTime::from_hms_opt(8, 0, 0);

    let err = LogRecord::new(d, "CNC", "P", "An", Shift::Morning, nine, eight, None, None)
        .unwrap_err();
    assert!(matches!(err, AppError::NegativeDuration { .. }));

    let err = LogRecord::new(d, "CNC", "P", "An", Shift::Morning, None, None, None, None)
        .unwrap_err();
    assert!(matches!(err, AppError::MissingHours));

    let err = LogRecord::new(d, " ", "P", "An", Shift::Morning, None, None, Some(1.0), None)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidField(_)));

    let r = LogRecord::new(d, "CNC", "P", "An", Shift::Morning, eight, nine, Some(5.0), None)
        .expect("explicit hours win");
    assert_eq!(r.hours, 5.0);
}
