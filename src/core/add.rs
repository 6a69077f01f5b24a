use crate::errors::{AppError, AppResult};
use crate::models::{LogRecord, Shift};
use crate::store::LogStore;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::formatting::hours2readable;
use crate::utils::time::parse_optional_time;

/// Raw values of one `add` invocation, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct AddInput {
    pub date: String,
    pub machine: String,
    pub project: String,
    pub operator: String,
    pub shift: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub hours: Option<String>,
    pub notes: Option<String>,
}

pub struct AddLogic;

impl AddLogic {
    /// Validate the input into a record.
    pub fn build(input: &AddInput, default_shift: Shift) -> AppResult<LogRecord> {
        let d = date::parse_date(&input.date)
            .ok_or_else(|| AppError::InvalidDate(input.date.clone()))?;

        let shift = match &input.shift {
            Some(label) => {
                Shift::from_label(label).ok_or_else(|| AppError::InvalidShift(label.clone()))?
            }
            None => default_shift,
        };

        let start = parse_optional_time(input.start.as_ref())?;
        let end = parse_optional_time(input.end.as_ref())?;

        let hours = match &input.hours {
            Some(h) => Some(
                h.trim()
                    .replace(',', ".")
                    .parse::<f64>()
                    .map_err(|_| AppError::InvalidHours(h.clone()))?,
            ),
            None => None,
        };

        LogRecord::new(
            d,
            &input.machine,
            &input.project,
            &input.operator,
            shift,
            start,
            end,
            hours,
            input.notes.clone(),
        )
    }

    /// Build the record and append it to the store.
    pub fn apply(store: &dyn LogStore, input: &AddInput, default_shift: Shift) -> AppResult<LogRecord> {
        let record = Self::build(input, default_shift)?;

        if let (Some(h), Some(s), Some(e)) = (input.hours.as_ref(), record.start, record.end)
            && let Some(span) = crate::utils::time::hours_between(s, e)
            && (span - record.hours).abs() > 0.01
        {
            tracing::warn!(hours = %h, span, "explicit hours differ from start/end span");
        }

        store.append(&record)?;

        success(format!(
            "Logged {} on {} for {} / {} ({}, {})",
            hours2readable(record.hours),
            record.date,
            record.machine,
            record.project,
            record.operator,
            record.shift
        ));

        Ok(record)
    }
}
