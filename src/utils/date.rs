use chrono::{Datelike, NaiveDate};

/// Date formats accepted from the CLI and from text cells.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // "2024-01-01 00:00:00" as written by spreadsheet tools
    let head = s.split([' ', 'T']).next().unwrap_or(s);

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(head, fmt).ok())
}

pub fn month_last_day(y: i32, m: u32) -> Option<u32> {
    let next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    }?;
    next.pred_opt().map(|d| d.day())
}
