use super::row::LogRow;
use crate::schema::LogField;
use chrono::NaiveDate;

/// Ordered sequence of loaded rows. Insertion order is append order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    rows: Vec<LogRow>,
}

impl LogTable {
    pub fn new(rows: Vec<LogRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: LogRow) {
        self.rows.push(row);
    }

    /// Distinct values of a categorical column, in order of first appearance.
    pub fn distinct(&self, field: LogField) -> Vec<String> {
        let mut seen = Vec::<String>::new();
        for row in &self.rows {
            let v = match field {
                LogField::Machine => &row.machine,
                LogField::Project => &row.project,
                LogField::Operator => &row.operator,
                LogField::Shift => &row.shift,
                LogField::Notes => &row.notes,
                _ => continue,
            };
            if !seen.iter().any(|s| s == v) {
                seen.push(v.clone());
            }
        }
        seen
    }

    /// Earliest and latest valid date. Rows with a bad date are ignored.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.rows.iter().filter_map(|r| r.date.get());
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Sum of valid hours, in row order.
    pub fn total_hours(&self) -> f64 {
        self.rows.iter().filter_map(|r| r.hours.get()).sum()
    }

    /// Number of rows carrying at least one unparseable cell.
    pub fn invalid_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.has_errors()).count()
    }
}

impl FromIterator<LogRow> for LogTable {
    fn from_iter<I: IntoIterator<Item = LogRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LogTable {
    type Item = &'a LogRow;
    type IntoIter = std::slice::Iter<'a, LogRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
