use crate::engine::{Aggregation, Selection, aggregate};
use crate::errors::AppResult;
use crate::ingest::{IngestField, IngestReport, IngestRow, filter_rows, load_workbook};
use crate::models::Parsed;
use crate::store::cells::OutCell;
use crate::utils::fmt_hours;
use crate::utils::table::{Column, Table};
use std::path::Path;

/// Breakdown of one ingested workbook.
pub struct IngestSummary {
    pub source: String,
    pub report: IngestReport,
    pub rows: Vec<IngestRow>,
    pub summaries: Vec<Aggregation>,
}

pub struct IngestLogic;

impl IngestLogic {
    /// Read the workbook, narrow it to the selected projects/machines and
    /// sum hours by category, by project and by project + machine.
    pub fn run(path: &Path, project: &Selection, machine: &Selection) -> AppResult<IngestSummary> {
        let report = load_workbook(path)?;
        let rows = filter_rows(&report.rows, project, machine);

        let groupings: [&[IngestField]; 3] = [
            &[IngestField::Category],
            &[IngestField::Project],
            &[IngestField::Project, IngestField::Machine],
        ];
        let summaries = groupings
            .iter()
            .map(|g| aggregate(&rows, *g, IngestField::Hours))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(IngestSummary {
            source: path.display().to_string(),
            report,
            rows,
            summaries,
        })
    }
}

pub fn ingest_headers() -> Vec<&'static str> {
    [
        IngestField::Category,
        IngestField::Project,
        IngestField::Machine,
        IngestField::Minutes,
        IngestField::Hours,
    ]
    .iter()
    .map(|f| f.header())
    .collect()
}

pub fn ingest_row_cells(r: &IngestRow) -> Vec<OutCell> {
    let num = |p: &Parsed<f64>| match p {
        Parsed::Value(v) => OutCell::Number(*v),
        Parsed::Missing => OutCell::Empty,
        Parsed::Invalid(raw) => OutCell::Text(raw.clone()),
    };
    vec![
        OutCell::Text(r.category.clone()),
        OutCell::Text(r.project.clone()),
        OutCell::Text(r.machine.clone()),
        num(&r.minutes),
        num(&r.hours),
    ]
}

/// Plain text rendering of the ingest breakdown.
pub fn render_ingest(summary: &IngestSummary, sep: char) -> String {
    let mut out = String::new();
    out.push_str(&format!("Machining time from {}\n", summary.source));
    out.push_str(&format!(
        "Sheets: {} | Rows: {} | Hours: {}\n",
        summary.report.sheets.join(", "),
        summary.rows.len(),
        fmt_hours(summary.rows.iter().filter_map(|r| r.hours.get()).sum())
    ));

    for agg in &summary.summaries {
        out.push_str(&format!("\n{}\n", agg.title()));
        out.push_str(&crate::core::report::render_summary(agg, sep));
    }

    if !summary.report.issues.is_empty() {
        let mut table = Table::new(vec![Column::left("Sheet"), Column::left("Missing columns")])
            .with_separator(sep);
        for issue in &summary.report.issues {
            table.add_row(vec![issue.sheet.clone(), issue.missing.join(", ")]);
        }
        out.push_str("\nSkipped sheets\n");
        out.push_str(&table.render());
    }

    out
}
