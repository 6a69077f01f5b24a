use crate::engine::{Aggregation, FilterSpec, aggregate, filter};
use crate::errors::AppResult;
use crate::models::{LogRow, LogTable};
use crate::schema::LogField;
use crate::store::cells::{canonical_headers, row_to_cells};
use crate::utils::fmt_hours;
use crate::utils::table::{Column, Table};

/// Filtered rows of one session plus their summaries.
pub struct Report {
    pub title: String,
    pub loaded: usize,
    pub rows: LogTable,
    pub summaries: Vec<Aggregation>,
}

impl Report {
    pub fn build(table: &LogTable, spec: &FilterSpec, groupings: &[Vec<LogField>]) -> AppResult<Self> {
        let rows = filter(table, spec);

        let summaries = groupings
            .iter()
            .map(|g| aggregate(&rows, g.as_slice(), LogField::Hours))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            title: build_title(spec),
            loaded: table.len(),
            rows,
            summaries,
        })
    }

    pub fn total_hours(&self) -> f64 {
        self.rows.total_hours()
    }
}

/// Title from the selected date range, e.g. "Machine usage from A to B".
fn build_title(spec: &FilterSpec) -> String {
    let r = spec.date_range;
    if r.start() == chrono::NaiveDate::MIN && r.end() == chrono::NaiveDate::MAX {
        "Machine usage".to_string()
    } else if r.start() == r.end() {
        format!("Machine usage on {}", r.start())
    } else {
        format!("Machine usage from {} to {}", r.start(), r.end())
    }
}

/// Filtered records as a text table.
pub fn render_rows(rows: &[LogRow], sep: char) -> String {
    let columns = canonical_headers()
        .into_iter()
        .map(|h| {
            if h == LogField::Hours.header() {
                Column::right(h)
            } else {
                Column::left(h)
            }
        })
        .collect();

    let mut table = Table::new(columns).with_separator(sep);
    for row in rows {
        table.add_row(row_to_cells(row).iter().map(|c| c.render()).collect());
    }
    table.render()
}

/// One summary as a text table, largest total first, with a share column
/// and a closing total line.
pub fn render_summary(agg: &Aggregation, sep: char) -> String {
    let mut columns: Vec<Column> = agg.group_by.iter().map(|g| Column::left(g)).collect();
    columns.push(Column::right(&agg.measure));
    columns.push(Column::right("Share"));

    let total = agg.total();
    let mut table = Table::new(columns).with_separator(sep);

    for (key, value) in agg.sorted_by_total() {
        let mut cells = key.clone();
        cells.push(fmt_hours(value));
        cells.push(share(value, total));
        table.add_row(cells);
    }

    let mut out = table.render();
    out.push_str(&format!("Total: {}", fmt_hours(total)));
    if agg.excluded > 0 {
        out.push_str(&format!(" ({} row(s) without valid {})", agg.excluded, agg.measure.to_lowercase()));
    }
    out.push('\n');
    out
}

fn share(value: f64, total: f64) -> String {
    if total > 0.0 {
        format!("{:.1}%", value / total * 100.0)
    } else {
        "-".to_string()
    }
}

/// Whole report as plain text (used for the terminal and for text exports).
pub fn render_report(report: &Report, sep: char, with_rows: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", report.title));
    out.push_str(&format!(
        "Records: {} of {} | Hours: {}\n",
        report.rows.len(),
        report.loaded,
        fmt_hours(report.total_hours())
    ));

    if with_rows {
        out.push_str("\nRecords\n");
        out.push_str(&render_rows(report.rows.rows(), sep));
    }

    for agg in &report.summaries {
        out.push_str(&format!("\n{}\n", agg.title()));
        out.push_str(&render_summary(agg, sep));
    }

    out
}
