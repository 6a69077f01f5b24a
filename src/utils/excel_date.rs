//! Conversion between chrono values and Excel serial numbers
//! (days since 1899-12-30, time of day as a fraction).

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

pub fn date_to_serial(d: NaiveDate) -> f64 {
    (d - excel_epoch()).num_days() as f64
}

pub fn time_to_serial(t: NaiveTime) -> f64 {
    t.num_seconds_from_midnight() as f64 / 86400.0
}

/// Integer part of the serial → date. Values below 1 are not dates.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    excel_epoch().checked_add_signed(Duration::days(serial.floor() as i64))
}

/// Fractional part of the serial → time of day, rounded to the second.
pub fn serial_to_time(serial: f64) -> Option<NaiveTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let secs = (serial.fract() * 86400.0).round() as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs.min(86399), 0)
}
