//! Formatting utilities used for CLI and export outputs.

use regex::Regex;
use std::sync::OnceLock;

/// Hours with two decimals, as shown in reports.
pub fn fmt_hours(h: f64) -> String {
    format!("{:.2}", h)
}

/// Hours as `07h 30m`.
pub fn hours2readable(hours: f64) -> String {
    let total_mins = (hours * 60.0).round() as i64;
    format!("{:02}h {:02}m", total_mins / 60, total_mins % 60)
}

/// Remove ANSI escape sequences (for text exports).
pub fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex"));
    re.replace_all(s, "").into_owned()
}
