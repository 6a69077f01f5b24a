//! Ingestion of externally produced machining workbooks.
//!
//! Every sheet is one machine category. Headers are bilingual
//! (Vietnamese/English) and may sit below a few title rows. Hours are
//! derived from the total machining time in minutes.

use crate::engine::{Groupable, Selection};
use crate::errors::{AppError, AppResult};
use crate::models::Parsed;
use crate::schema::resolve_columns;
use crate::store::RawCell;
use crate::store::xlsx::raw_from_data;
use calamine::{Reader, open_workbook_auto};
use std::fmt;
use std::path::Path;

/// Rows scanned when looking for the header row of a sheet.
const HEADER_SCAN_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IngestField {
    Category,
    Project,
    Machine,
    Minutes,
    Hours,
}

impl IngestField {
    pub const REQUIRED: [IngestField; 3] =
        [IngestField::Project, IngestField::Machine, IngestField::Minutes];

    pub fn header(&self) -> &'static str {
        match self {
            IngestField::Category => "Category",
            IngestField::Project => "Project",
            IngestField::Machine => "Machine",
            IngestField::Minutes => "Minutes",
            IngestField::Hours => "Hours",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            IngestField::Category => &["category", "loại máy", "nhóm máy"],
            IngestField::Project => &[
                "project code",
                "project",
                "project no",
                "mã dự án",
                "mã dự án/project code",
                "dự án",
                "mã công trình",
            ],
            IngestField::Machine => &[
                "machine",
                "machine name",
                "machine no",
                "máy",
                "tên máy",
                "số máy",
            ],
            IngestField::Minutes => &[
                "total machining time (min)",
                "total machining time (minutes)",
                "total machining time",
                "machining time (min)",
                "tổng thời gian gia công (phút)",
                "tổng thời gian gia công",
                "thời gian gia công (phút)",
                "thời gian gia công",
                "tổng thời gian (phút)",
                "minutes",
            ],
            IngestField::Hours => &["hours", "số giờ"],
        }
    }
}

impl fmt::Display for IngestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestRow {
    pub category: String,
    pub project: String,
    pub machine: String,
    pub minutes: Parsed<f64>,
    pub hours: Parsed<f64>,
}

impl Groupable for IngestRow {
    type Field = IngestField;

    fn key(&self, field: IngestField) -> Option<String> {
        match field {
            IngestField::Category => Some(self.category.clone()),
            IngestField::Project => Some(self.project.clone()),
            IngestField::Machine => Some(self.machine.clone()),
            IngestField::Minutes => self.minutes.get().map(|m| m.to_string()),
            IngestField::Hours => self.hours.get().map(|h| h.to_string()),
        }
    }

    fn measure(&self, field: IngestField) -> Option<f64> {
        match field {
            IngestField::Minutes => self.minutes.get(),
            IngestField::Hours => self.hours.get(),
            _ => None,
        }
    }

    fn is_numeric(field: IngestField) -> bool {
        matches!(field, IngestField::Minutes | IngestField::Hours)
    }
}

/// A non-empty sheet whose header could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetIssue {
    pub sheet: String,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub rows: Vec<IngestRow>,
    /// Sheets that were read successfully, in workbook order.
    pub sheets: Vec<String>,
    pub issues: Vec<SheetIssue>,
}

impl IngestReport {
    pub fn invalid_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.minutes.is_invalid()).count()
    }
}

/// Read every sheet of the workbook at `path`.
pub fn load_workbook(path: &Path) -> AppResult<IngestReport> {
    let mut workbook = open_workbook_auto(path).map_err(|e| AppError::store(path, e))?;
    let mut report = IngestReport::default();

    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| AppError::store(path, e))?;
        let rows: Vec<Vec<RawCell>> = range
            .rows()
            .map(|r| r.iter().map(raw_from_data).collect())
            .collect();

        match parse_sheet(&name, &rows) {
            SheetOutcome::Empty => {
                tracing::debug!(sheet = %name, "empty sheet skipped");
            }
            SheetOutcome::Rows(mut parsed) => {
                tracing::debug!(sheet = %name, rows = parsed.len(), "sheet ingested");
                report.rows.append(&mut parsed);
                report.sheets.push(name);
            }
            SheetOutcome::Unresolved(issue) => {
                tracing::warn!(sheet = %name, missing = ?issue.missing, "sheet header not recognised");
                report.issues.push(issue);
            }
        }
    }

    if report.sheets.is_empty() {
        let missing = report
            .issues
            .first()
            .map(|i| i.missing.clone())
            .unwrap_or_else(|| {
                IngestField::REQUIRED
                    .iter()
                    .map(|f| f.header().to_string())
                    .collect()
            });
        return Err(AppError::Schema {
            source_name: path.display().to_string(),
            missing,
        });
    }

    Ok(report)
}

#[derive(Debug)]
pub enum SheetOutcome {
    Empty,
    Rows(Vec<IngestRow>),
    Unresolved(SheetIssue),
}

/// Locate the header row among the first rows of the sheet, then read the
/// data rows below it.
pub fn parse_sheet(sheet: &str, rows: &[Vec<RawCell>]) -> SheetOutcome {
    if rows.iter().all(|r| r.iter().all(RawCell::is_empty)) {
        return SheetOutcome::Empty;
    }

    let fields = [
        IngestField::Project,
        IngestField::Machine,
        IngestField::Minutes,
    ];

    let mut best_missing: Option<Vec<String>> = None;

    for (header_idx, header) in rows.iter().take(HEADER_SCAN_ROWS).enumerate() {
        let headers: Vec<String> = header.iter().map(RawCell::as_text).collect();
        let columns = resolve_columns(&headers, &fields, IngestField::aliases);

        let missing: Vec<String> = fields
            .iter()
            .filter(|f| !columns.contains_key(*f))
            .map(|f| f.header().to_string())
            .collect();

        if !missing.is_empty() {
            if best_missing.as_ref().is_none_or(|b| missing.len() < b.len()) {
                best_missing = Some(missing);
            }
            continue;
        }

        let project = columns[&IngestField::Project];
        let machine = columns[&IngestField::Machine];
        let minutes = columns[&IngestField::Minutes];
        let category = sheet.trim().to_string();

        let data = rows[header_idx + 1..]
            .iter()
            .filter(|cells| !cells.iter().all(RawCell::is_empty))
            .map(|cells| {
                let text = |i: usize| cells.get(i).map(RawCell::as_text).unwrap_or_default();
                let mins = cells
                    .get(minutes)
                    .map(RawCell::to_number)
                    .unwrap_or(Parsed::Missing);
                let hours = match &mins {
                    Parsed::Value(m) => Parsed::Value(m / 60.0),
                    Parsed::Missing => Parsed::Missing,
                    Parsed::Invalid(raw) => Parsed::Invalid(raw.clone()),
                };
                IngestRow {
                    category: category.clone(),
                    project: text(project),
                    machine: text(machine),
                    minutes: mins,
                    hours,
                }
            })
            .collect();

        return SheetOutcome::Rows(data);
    }

    SheetOutcome::Unresolved(SheetIssue {
        sheet: sheet.to_string(),
        missing: best_missing.unwrap_or_default(),
    })
}

/// Rows whose project and machine are both selected, in original order.
pub fn filter_rows(rows: &[IngestRow], project: &Selection, machine: &Selection) -> Vec<IngestRow> {
    rows.iter()
        .filter(|r| project.matches(&r.project) && machine.matches(&r.machine))
        .cloned()
        .collect()
}
