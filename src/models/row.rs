use super::record::LogRecord;
use super::shift::Shift;
use chrono::{NaiveDate, NaiveTime};

/// Outcome of parsing one cell.
///
/// `Invalid` keeps the original text so the row can still be displayed and
/// rewritten unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Value(T),
    Missing,
    Invalid(String),
}

impl<T> Parsed<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Parsed::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Parsed::Invalid(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Parsed::Missing)
    }
}

impl<T: Copy> Parsed<T> {
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

impl<T> From<Option<T>> for Parsed<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Parsed::Value(v),
            None => Parsed::Missing,
        }
    }
}

/// A row as loaded from storage. Cells that failed to parse stay on the row
/// as `Parsed::Invalid`; they are excluded only from the computations that
/// need them.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    /// 1-based row number in the source sheet (header = 1).
    pub line: usize,
    pub date: Parsed<NaiveDate>,
    pub machine: String,
    pub project: String,
    pub operator: String,
    pub shift: String,
    pub start: Parsed<NaiveTime>,
    pub end: Parsed<NaiveTime>,
    pub hours: Parsed<f64>,
    pub notes: String,
    /// Hours cell was empty and End is before Start. `hours` stays
    /// `Missing` so the blank cell is written back as it was.
    pub span_error: bool,
}

impl LogRow {
    /// True when any cell of the row failed to parse.
    pub fn has_errors(&self) -> bool {
        self.date.is_invalid()
            || self.start.is_invalid()
            || self.end.is_invalid()
            || self.hours.is_invalid()
            || self.span_error
    }

    /// Convert back into a typed record. Returns None when a required value
    /// is missing or invalid, or when the shift label is not recognised.
    pub fn to_record(&self) -> Option<LogRecord> {
        Some(LogRecord {
            date: self.date.get()?,
            machine: self.machine.clone(),
            project: self.project.clone(),
            operator: self.operator.clone(),
            shift: Shift::from_label(&self.shift)?,
            start: self.start.get(),
            end: self.end.get(),
            hours: self.hours.get()?,
            notes: if self.notes.is_empty() {
                None
            } else {
                Some(self.notes.clone())
            },
        })
    }
}

impl From<&LogRecord> for LogRow {
    fn from(r: &LogRecord) -> Self {
        Self {
            line: 0,
            date: Parsed::Value(r.date),
            machine: r.machine.clone(),
            project: r.project.clone(),
            operator: r.operator.clone(),
            shift: r.shift.label().to_string(),
            start: r.start.into(),
            end: r.end.into(),
            hours: Parsed::Value(r.hours),
            notes: r.notes.clone().unwrap_or_default(),
            span_error: false,
        }
    }
}
