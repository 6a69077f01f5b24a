//! Cell-level conversion between sheet values and log rows.

use crate::errors::AppResult;
use crate::models::{LogRow, LogTable, Parsed, Shift};
use crate::schema::{ColumnMap, LogField};
use crate::utils::date::parse_date;
use crate::utils::excel_date::{serial_to_date, serial_to_time};
use crate::utils::time::{hours_between, parse_time};
use chrono::{NaiveDate, NaiveTime, Timelike};

/// A cell as read from a workbook or CSV file.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    /// Excel date/time serial.
    DateTime(f64),
}

impl RawCell {
    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering used for categorical columns.
    pub fn as_text(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.trim().to_string(),
            RawCell::Number(n) | RawCell::DateTime(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }

    pub fn to_date(&self) -> Parsed<NaiveDate> {
        match self {
            c if c.is_empty() => Parsed::Missing,
            RawCell::Number(n) | RawCell::DateTime(n) => match serial_to_date(*n) {
                Some(d) => Parsed::Value(d),
                None => Parsed::Invalid(self.as_text()),
            },
            RawCell::Text(s) => match parse_date(s) {
                Some(d) => Parsed::Value(d),
                None => Parsed::Invalid(s.trim().to_string()),
            },
            RawCell::Empty => Parsed::Missing,
        }
    }

    pub fn to_time(&self) -> Parsed<NaiveTime> {
        match self {
            c if c.is_empty() => Parsed::Missing,
            RawCell::Number(n) | RawCell::DateTime(n) => match serial_to_time(*n) {
                Some(t) => Parsed::Value(t),
                None => Parsed::Invalid(self.as_text()),
            },
            RawCell::Text(s) => {
                // "2024-01-01 08:30:00" keeps only the clock part
                let clock = s.trim().rsplit([' ', 'T']).next().unwrap_or(s.as_str());
                match parse_time(clock) {
                    Some(t) => Parsed::Value(t),
                    None => Parsed::Invalid(s.trim().to_string()),
                }
            }
            RawCell::Empty => Parsed::Missing,
        }
    }

    /// Non-negative number. Text accepts a decimal comma (`1,5`).
    pub fn to_number(&self) -> Parsed<f64> {
        let checked = |n: f64, raw: String| {
            if n.is_finite() && n >= 0.0 {
                Parsed::Value(n)
            } else {
                Parsed::Invalid(raw)
            }
        };

        match self {
            c if c.is_empty() => Parsed::Missing,
            RawCell::Number(n) | RawCell::DateTime(n) => checked(*n, self.as_text()),
            RawCell::Text(s) => {
                let t = s.trim();
                match t.replace(',', ".").parse::<f64>() {
                    Ok(n) => checked(n, t.to_string()),
                    Err(_) => Parsed::Invalid(t.to_string()),
                }
            }
            RawCell::Empty => Parsed::Missing,
        }
    }
}

/// Turn a header row plus data rows into a LogTable.
///
/// A sheet with no rows at all is an empty table. Fully empty rows are
/// dropped. Unparseable cells are kept on the row as `Parsed::Invalid`.
pub fn parse_log_rows(source_name: &str, rows: &[Vec<RawCell>]) -> AppResult<LogTable> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(LogTable::default());
    };

    let headers: Vec<String> = header.iter().map(RawCell::as_text).collect();
    if headers.iter().all(|h| h.is_empty()) && data.is_empty() {
        return Ok(LogTable::default());
    }

    let columns = ColumnMap::resolve(source_name, &headers)?;

    let mut table = LogTable::default();
    for (i, cells) in data.iter().enumerate() {
        if cells.iter().all(RawCell::is_empty) {
            continue;
        }

        let cell = |f: LogField| cell_at(&columns, cells, f);

        let start = cell(LogField::Start).to_time();
        let end = cell(LogField::End).to_time();
        let (hours, span_error) = match cell(LogField::Hours).to_number() {
            Parsed::Missing => derive_hours(&start, &end),
            other => (other, false),
        };

        table.push(LogRow {
            line: i + 2,
            date: cell(LogField::Date).to_date(),
            machine: cell(LogField::Machine).as_text(),
            project: cell(LogField::Project).as_text(),
            operator: cell(LogField::Operator).as_text(),
            shift: Shift::canonical_label(&cell(LogField::Shift).as_text()),
            start,
            end,
            hours,
            notes: cell(LogField::Notes).as_text(),
            span_error,
        });
    }

    let invalid = table.invalid_rows();
    if invalid > 0 {
        tracing::warn!(source = source_name, invalid, "rows with unparseable cells");
    }
    tracing::debug!(source = source_name, rows = table.len(), "log rows parsed");

    Ok(table)
}

static EMPTY: RawCell = RawCell::Empty;

fn cell_at<'a>(columns: &ColumnMap, cells: &'a [RawCell], field: LogField) -> &'a RawCell {
    columns
        .index(field)
        .and_then(|idx| cells.get(idx))
        .unwrap_or(&EMPTY)
}

/// Hours from a start/end pair. `end < start` is a data-entry error: the
/// hours stay `Missing` and the flag is set.
fn derive_hours(start: &Parsed<NaiveTime>, end: &Parsed<NaiveTime>) -> (Parsed<f64>, bool) {
    match (start, end) {
        (Parsed::Value(s), Parsed::Value(e)) => match hours_between(*s, *e) {
            Some(h) => (Parsed::Value(h), false),
            None => (Parsed::Missing, true),
        },
        _ => (Parsed::Missing, false),
    }
}

/// A value to be written back to storage.
#[derive(Debug, Clone, PartialEq)]
pub enum OutCell {
    Empty,
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Number(f64),
}

impl OutCell {
    fn text(s: &str) -> Self {
        if s.is_empty() {
            OutCell::Empty
        } else {
            OutCell::Text(s.to_string())
        }
    }

    /// CSV / plain text rendering.
    pub fn render(&self) -> String {
        match self {
            OutCell::Empty => String::new(),
            OutCell::Text(s) => s.clone(),
            OutCell::Date(d) => d.format("%Y-%m-%d").to_string(),
            OutCell::Time(t) if t.second() != 0 => t.format("%H:%M:%S").to_string(),
            OutCell::Time(t) => t.format("%H:%M").to_string(),
            OutCell::Number(n) => n.to_string(),
        }
    }
}

/// Cells of a row in canonical column order. Invalid cells are written back
/// with their original text.
pub fn row_to_cells(row: &LogRow) -> Vec<OutCell> {
    fn parsed<T: Clone>(p: &Parsed<T>, wrap: fn(T) -> OutCell) -> OutCell {
        match p {
            Parsed::Value(v) => wrap(v.clone()),
            Parsed::Missing => OutCell::Empty,
            Parsed::Invalid(raw) => OutCell::text(raw),
        }
    }

    LogField::ALL
        .iter()
        .map(|f| match f {
            LogField::Date => parsed(&row.date, OutCell::Date),
            LogField::Machine => OutCell::text(&row.machine),
            LogField::Project => OutCell::text(&row.project),
            LogField::Operator => OutCell::text(&row.operator),
            LogField::Shift => OutCell::text(&row.shift),
            LogField::Start => parsed(&row.start, OutCell::Time),
            LogField::End => parsed(&row.end, OutCell::Time),
            LogField::Hours => parsed(&row.hours, OutCell::Number),
            LogField::Notes => OutCell::text(&row.notes),
        })
        .collect()
}

pub fn canonical_headers() -> Vec<&'static str> {
    LogField::ALL.iter().map(|f| f.header()).collect()
}
