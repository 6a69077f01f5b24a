//! Canonical log columns and header resolution.
//!
//! Every sheet header is matched against an explicit alias table
//! (canonical field → accepted header strings, English and Vietnamese).
//! Resolution happens once per sheet, right after the header row is read.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogField {
    Date,
    Machine,
    Project,
    Operator,
    Shift,
    Start,
    End,
    Hours,
    Notes,
}

impl LogField {
    /// Column order used when writing a store.
    pub const ALL: [LogField; 9] = [
        LogField::Date,
        LogField::Machine,
        LogField::Project,
        LogField::Operator,
        LogField::Shift,
        LogField::Start,
        LogField::End,
        LogField::Hours,
        LogField::Notes,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            LogField::Date => "Date",
            LogField::Machine => "Machine",
            LogField::Project => "Project",
            LogField::Operator => "Operator",
            LogField::Shift => "Shift",
            LogField::Start => "Start",
            LogField::End => "End",
            LogField::Hours => "Hours",
            LogField::Notes => "Notes",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            LogField::Date => &["date", "ngày", "ngày làm việc", "work date"],
            LogField::Machine => &["machine", "machine name", "máy", "tên máy", "thiết bị"],
            LogField::Project => &[
                "project",
                "activity",
                "project code",
                "dự án",
                "mã dự án",
                "công việc",
            ],
            LogField::Operator => &[
                "operator",
                "user",
                "người vận hành",
                "nhân viên",
                "công nhân",
            ],
            LogField::Shift => &["shift", "ca", "ca làm việc"],
            LogField::Start => &["start", "start time", "giờ bắt đầu", "bắt đầu"],
            LogField::End => &["end", "end time", "giờ kết thúc", "kết thúc"],
            LogField::Hours => &["hours", "hour", "số giờ", "tổng giờ"],
            LogField::Notes => &["notes", "note", "ghi chú"],
        }
    }

    /// Fields usable as a sum measure.
    pub fn is_numeric(&self) -> bool {
        matches!(self, LogField::Hours)
    }

    /// Parse a field name given on the CLI (`machine`, `Project`, ...).
    pub fn from_name(name: &str) -> AppResult<Self> {
        let n = normalize_header(name);
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.header().eq_ignore_ascii_case(&n) || f.aliases().contains(&n.as_str()))
            .ok_or_else(|| AppError::InvalidField(name.to_string()))
    }
}

impl fmt::Display for LogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

fn unit_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*[\(\[][^\)\]]*[\)\]]\s*$").expect("static regex"))
}

/// Lowercase, trim and collapse whitespace so that `"  Tên   Máy "` and
/// `"tên máy"` compare equal.
pub fn normalize_header(h: &str) -> String {
    h.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Same as `normalize_header` with a trailing unit like `(phút)` removed.
fn strip_unit(h: &str) -> String {
    unit_suffix().replace(h, "").trim().to_string()
}

/// Forms a header may be matched by: the whole header, then each part of
/// a bilingual header (`Mã dự án / Project code`, or one language per line),
/// each with and without a trailing unit.
fn header_variants(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut push = |v: String| {
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    };

    let full = normalize_header(raw);
    push(strip_unit(&full));
    for part in raw.split(['/', '\n', '|']) {
        let p = normalize_header(part);
        push(strip_unit(&p));
        push(p);
    }
    out
}

/// Map header cells to column indexes for the given fields.
///
/// A column whose whole header is an alias wins; otherwise any variant of
/// the header (see `header_variants`) may match. When two columns match the
/// same field the first one is used.
pub fn resolve_columns<F>(
    headers: &[String],
    fields: &[F],
    aliases: fn(&F) -> &'static [&'static str],
) -> HashMap<F, usize>
where
    F: Copy + Eq + Hash,
{
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let variants: Vec<Vec<String>> = headers.iter().map(|h| header_variants(h)).collect();
    let mut map = HashMap::new();

    for field in fields {
        let accepted: Vec<String> = aliases(field)
            .iter()
            .flat_map(|a| [a.to_string(), strip_unit(a)])
            .collect();

        let exact = normalized.iter().position(|h| accepted.contains(h));
        let found = exact.or_else(|| {
            variants
                .iter()
                .position(|vs| vs.iter().any(|v| accepted.contains(v)))
        });

        if let Some(idx) = found {
            map.insert(*field, idx);
        }
    }

    map
}

/// Resolved positions of the canonical log columns within one sheet.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    columns: HashMap<LogField, usize>,
}

impl ColumnMap {
    /// Resolve a header row. Date, Machine, Project, Operator and Shift are
    /// required, plus either Hours or both Start and End.
    pub fn resolve(source_name: &str, headers: &[String]) -> AppResult<Self> {
        let columns = resolve_columns(headers, &LogField::ALL, LogField::aliases);

        let mut missing: Vec<String> = [
            LogField::Date,
            LogField::Machine,
            LogField::Project,
            LogField::Operator,
            LogField::Shift,
        ]
        .iter()
        .filter(|f| !columns.contains_key(*f))
        .map(|f| f.header().to_string())
        .collect();

        let has_hours = columns.contains_key(&LogField::Hours);
        let has_span =
            columns.contains_key(&LogField::Start) && columns.contains_key(&LogField::End);
        if !has_hours && !has_span {
            missing.push(LogField::Hours.header().to_string());
        }

        if !missing.is_empty() {
            return Err(AppError::Schema {
                source_name: source_name.to_string(),
                missing,
            });
        }

        Ok(Self { columns })
    }

    pub fn index(&self, field: LogField) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}
