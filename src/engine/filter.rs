//! Multi-dimensional filter over a LogTable.
//! All predicates are AND-combined. Pure logic, no I/O.

use crate::errors::{AppError, AppResult};
use crate::models::{LogRow, LogTable};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Selected values for one categorical dimension.
///
/// `Only` with an empty set matches nothing; it is not the same as `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl Selection {
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Only(values.into_iter().map(Into::into).collect())
    }

    pub fn none() -> Self {
        Selection::Only(BTreeSet::new())
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => set.contains(value),
        }
    }
}

/// Inclusive date interval, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::InvalidRange(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Every representable date.
    pub fn unbounded() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub machine: Selection,
    pub project: Selection,
    pub operator: Selection,
    pub shift: Selection,
    pub date_range: DateRange,
}

impl FilterSpec {
    /// Everything selected, date range = the table's own bounds.
    pub fn all(table: &LogTable) -> Self {
        let date_range = match table.date_bounds() {
            Some((lo, hi)) => DateRange { start: lo, end: hi },
            None => DateRange::unbounded(),
        };
        Self {
            machine: Selection::All,
            project: Selection::All,
            operator: Selection::All,
            shift: Selection::All,
            date_range,
        }
    }

    pub fn matches(&self, row: &LogRow) -> bool {
        self.machine.matches(&row.machine)
            && self.project.matches(&row.project)
            && self.operator.matches(&row.operator)
            && self.shift.matches(&row.shift)
            && row.date.get().is_some_and(|d| self.date_range.contains(d))
    }
}

/// Rows of `table` satisfying every predicate of `spec`, in original order.
pub fn filter(table: &LogTable, spec: &FilterSpec) -> LogTable {
    let out: LogTable = table.iter().filter(|r| spec.matches(r)).cloned().collect();

    tracing::debug!(
        input = table.len(),
        kept = out.len(),
        "filter applied"
    );

    out
}
