//! Time utilities: parsing HH:MM, fractional hour spans.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

/// Hours between two times of the same day. None when `end < start`.
pub fn hours_between(start: NaiveTime, end: NaiveTime) -> Option<f64> {
    let secs = (end - start).num_seconds();
    if secs < 0 {
        return None;
    }
    Some(secs as f64 / 3600.0)
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}
