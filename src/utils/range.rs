use super::date::month_last_day;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Parse --range (year / month / day / interval).
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any two of the above joined by `:` (e.g. `2024-01:2024-03-15`)
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((a, b)) => (period_bounds(a.trim())?.0, period_bounds(b.trim())?.1),
        None => period_bounds(r.trim())?,
    };

    if start > end {
        return Err(AppError::InvalidRange(format!(
            "start {start} is after end {end}"
        )));
    }

    Ok((start, end))
}

/// First and last day covered by a single period expression.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let bad = || AppError::InvalidRange(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| bad())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(bad)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(bad)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let (ys, ms) = p.split_once('-').ok_or_else(bad)?;
            let y: i32 = ys.parse().map_err(|_| bad())?;
            let m: u32 = ms.parse().map_err(|_| bad())?;
            let last = month_last_day(y, m).ok_or_else(bad)?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(bad)?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(bad)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| bad())?;
            Ok((d, d))
        }
        _ => Err(bad()),
    }
}
