// src/export/model.rs

use crate::core::ingest::{IngestSummary, ingest_headers, ingest_row_cells, render_ingest};
use crate::core::report::{Report, render_report};
use crate::engine::Aggregation;
use crate::store::cells::{OutCell, canonical_headers, row_to_cells};
use serde::Serialize;
use serde_json::{Map, Value};

/// Everything an exporter needs, independent of where the rows came from.
pub struct ExportModel {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<OutCell>>,
    pub summaries: Vec<Aggregation>,
    /// ANSI-free text rendering for `txt` exports.
    pub text: String,
}

impl ExportModel {
    pub fn from_report(report: &Report, sep: char) -> Self {
        Self {
            title: report.title.clone(),
            headers: canonical_headers(),
            rows: report.rows.iter().map(row_to_cells).collect(),
            summaries: report.summaries.clone(),
            text: render_report(report, sep, true),
        }
    }

    pub fn from_ingest(summary: &IngestSummary, sep: char) -> Self {
        Self {
            title: format!("Machining time from {}", summary.source),
            headers: ingest_headers(),
            rows: summary.rows.iter().map(ingest_row_cells).collect(),
            summaries: summary.summaries.clone(),
            text: render_ingest(summary, sep),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Serialize)]
pub(crate) struct GroupExport {
    pub key: Vec<String>,
    pub hours: f64,
}

#[derive(Serialize)]
pub(crate) struct SummaryExport {
    pub group_by: Vec<String>,
    pub groups: Vec<GroupExport>,
    pub total: f64,
    pub excluded: usize,
}

impl From<&Aggregation> for SummaryExport {
    fn from(agg: &Aggregation) -> Self {
        Self {
            group_by: agg.group_by.clone(),
            groups: agg
                .sorted_by_total()
                .into_iter()
                .map(|(key, hours)| GroupExport {
                    key: key.clone(),
                    hours,
                })
                .collect(),
            total: agg.total(),
            excluded: agg.excluded,
        }
    }
}

/// One record as a JSON object keyed by column header.
pub(crate) fn row_to_json(headers: &[&str], cells: &[OutCell]) -> Value {
    let mut obj = Map::new();
    for (h, c) in headers.iter().zip(cells) {
        let v = match c {
            OutCell::Empty => Value::Null,
            OutCell::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            other => Value::String(other.render()),
        };
        obj.insert(h.to_string(), v);
    }
    Value::Object(obj)
}

const SHEET_NAME_MAX: usize = 31;

/// Worksheet name for a summary: "By Project-Machine", at most 31 chars.
/// Names already in `used` (compared case-insensitively, as Excel does) get
/// a " (2)", " (3)", ... suffix that still fits the limit.
pub(crate) fn summary_sheet_name(agg: &Aggregation, used: &[String]) -> String {
    let base: String = format!("By {}", agg.group_by.join("-"))
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { '-' } else { c })
        .collect();

    let taken = |name: &str| used.iter().any(|u| u.to_lowercase() == name.to_lowercase());

    let name: String = base.chars().take(SHEET_NAME_MAX).collect();
    if !taken(&name) {
        return name;
    }

    (2..)
        .map(|n| {
            let suffix = format!(" ({n})");
            let keep = SHEET_NAME_MAX.saturating_sub(suffix.chars().count());
            let head: String = base.chars().take(keep).collect();
            format!("{}{suffix}", head.trim_end())
        })
        .find(|candidate| !taken(candidate))
        .unwrap_or(name)
}
