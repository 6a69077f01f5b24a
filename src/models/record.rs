use super::shift::Shift;
use crate::errors::{AppError, AppResult};
use crate::utils::time::hours_between;
use chrono::{NaiveDate, NaiveTime};

/// One machine-usage entry, fully typed. This is what `append` persists.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub date: NaiveDate,
    pub machine: String,
    pub project: String,
    pub operator: String,
    pub shift: Shift,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub hours: f64,
    pub notes: Option<String>,
}

impl LogRecord {
    /// Build a record, deriving `hours` from start/end when it is not given.
    ///
    /// - explicit `hours` wins over start/end
    /// - `end < start` is rejected, never wrapped to the next day
    /// - negative or non-finite hours are rejected
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        machine: &str,
        project: &str,
        operator: &str,
        shift: Shift,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
        hours: Option<f64>,
        notes: Option<String>,
    ) -> AppResult<Self> {
        let hours = match (hours, start, end) {
            (Some(h), _, _) => {
                if !h.is_finite() || h < 0.0 {
                    return Err(AppError::InvalidHours(h.to_string()));
                }
                h
            }
            (None, Some(s), Some(e)) => {
                hours_between(s, e).ok_or_else(|| AppError::NegativeDuration {
                    start: s.format("%H:%M").to_string(),
                    end: e.format("%H:%M").to_string(),
                })?
            }
            _ => return Err(AppError::MissingHours),
        };

        for (name, value) in [("machine", machine), ("project", project), ("operator", operator)] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidField(format!("{name} must not be empty")));
            }
        }

        Ok(Self {
            date,
            machine: machine.trim().to_string(),
            project: project.trim().to_string(),
            operator: operator.trim().to_string(),
            shift,
            start,
            end,
            hours,
            notes: notes.filter(|n| !n.trim().is_empty()),
        })
    }
}
