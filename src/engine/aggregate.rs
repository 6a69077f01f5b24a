//! Grouped sums over any row type implementing `Groupable`.

use crate::errors::{AppError, AppResult};
use crate::models::LogRow;
use crate::schema::LogField;
use std::collections::BTreeMap;
use std::fmt::Display;

/// A row that can be grouped by categorical fields and summed over a
/// numeric one.
pub trait Groupable {
    type Field: Copy + Display;

    /// Key value of `field`, or None when the value is unavailable
    /// (e.g. an unparseable date).
    fn key(&self, field: Self::Field) -> Option<String>;

    /// Numeric value of `field`, or None when missing/non-numeric.
    fn measure(&self, field: Self::Field) -> Option<f64>;

    fn is_numeric(field: Self::Field) -> bool;
}

impl Groupable for LogRow {
    type Field = LogField;

    fn key(&self, field: LogField) -> Option<String> {
        match field {
            LogField::Date => self.date.get().map(|d| d.format("%Y-%m-%d").to_string()),
            LogField::Machine => Some(self.machine.clone()),
            LogField::Project => Some(self.project.clone()),
            LogField::Operator => Some(self.operator.clone()),
            LogField::Shift => Some(self.shift.clone()),
            LogField::Notes => Some(self.notes.clone()),
            LogField::Start => self.start.get().map(|t| t.format("%H:%M").to_string()),
            LogField::End => self.end.get().map(|t| t.format("%H:%M").to_string()),
            LogField::Hours => self.hours.get().map(|h| h.to_string()),
        }
    }

    fn measure(&self, field: LogField) -> Option<f64> {
        match field {
            LogField::Hours => self.hours.get(),
            _ => None,
        }
    }

    fn is_numeric(field: LogField) -> bool {
        field.is_numeric()
    }
}

/// Grouped sum of one measure.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub group_by: Vec<String>,
    pub measure: String,
    groups: BTreeMap<Vec<String>, f64>,
    /// Rows that contributed nothing (bad measure or unavailable key).
    pub excluded: usize,
}

impl Aggregation {
    pub fn get(&self, key: &[&str]) -> Option<f64> {
        let k: Vec<String> = key.iter().map(|s| s.to_string()).collect();
        self.groups.get(&k).copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Vec<String>, f64)> {
        self.groups.iter().map(|(k, v)| (k, *v))
    }

    /// Groups by descending total, ties in key order.
    pub fn sorted_by_total(&self) -> Vec<(&Vec<String>, f64)> {
        let mut v: Vec<_> = self.iter().collect();
        v.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        v
    }

    pub fn total(&self) -> f64 {
        self.groups.values().sum()
    }

    pub fn title(&self) -> String {
        format!("{} by {}", self.measure, self.group_by.join(" / "))
    }
}

/// Group `rows` by the tuple of `group_by` values and sum `measure`.
///
/// Sums accumulate in input order. Rows with a missing or non-numeric
/// measure are skipped, as are rows whose key cannot be built.
pub fn aggregate<'a, R, I>(rows: I, group_by: &[R::Field], measure: R::Field) -> AppResult<Aggregation>
where
    R: Groupable + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if group_by.is_empty() {
        return Err(AppError::InvalidField(
            "at least one group-by field is required".to_string(),
        ));
    }
    if !R::is_numeric(measure) {
        return Err(AppError::InvalidField(format!(
            "{measure} is not a numeric measure"
        )));
    }

    let mut groups: BTreeMap<Vec<String>, f64> = BTreeMap::new();
    let mut excluded = 0;

    for row in rows {
        let Some(value) = row.measure(measure) else {
            excluded += 1;
            continue;
        };
        let key: Option<Vec<String>> = group_by.iter().map(|f| row.key(*f)).collect();
        let Some(key) = key else {
            excluded += 1;
            continue;
        };
        *groups.entry(key).or_insert(0.0) += value;
    }

    tracing::debug!(groups = groups.len(), excluded, "aggregation built");

    Ok(Aggregation {
        group_by: group_by.iter().map(|f| f.to_string()).collect(),
        measure: measure.to_string(),
        groups,
        excluded,
    })
}
