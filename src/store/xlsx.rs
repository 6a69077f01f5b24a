//! XLSX store: read with calamine, rewrite with rust_xlsxwriter.

use super::cells::{OutCell, RawCell, canonical_headers, parse_log_rows, row_to_cells};
use super::{LogStore, write_atomically};
use crate::errors::{AppError, AppResult};
use crate::models::LogTable;
use crate::utils::excel_date::{date_to_serial, time_to_serial};
use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

pub struct XlsxStore {
    path: PathBuf,
    sheet: String,
}

impl XlsxStore {
    pub fn new(path: &Path, sheet: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
        }
    }
}

impl LogStore for XlsxStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AppResult<LogTable> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "store not found, empty table");
            return Ok(LogTable::default());
        }

        let rows = read_sheet(&self.path, &self.sheet)?;
        parse_log_rows(&format!("{} [{}]", self.path.display(), self.sheet), &rows)
    }

    fn write_all(&self, table: &LogTable) -> AppResult<()> {
        write_atomically(&self.path, |tmp| {
            let mut workbook = Workbook::new();
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&self.sheet)
                .map_err(|e| AppError::store(&self.path, e))?;

            let rows: Vec<Vec<OutCell>> = table.iter().map(row_to_cells).collect();
            write_table(worksheet, &canonical_headers(), &rows)
                .map_err(|e| AppError::store(&self.path, e))?;

            workbook
                .save(tmp)
                .map_err(|e| AppError::store(&self.path, e))
        })
    }
}

/// All rows of one sheet as raw cells.
pub fn read_sheet(path: &Path, sheet: &str) -> AppResult<Vec<Vec<RawCell>>> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| AppError::store(path, e))?;

    if !workbook.sheet_names().iter().any(|n| n == sheet) {
        return Err(AppError::store(path, format!("sheet '{sheet}' not found")));
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| AppError::store(path, e))?;

    Ok(range
        .rows()
        .map(|r| r.iter().map(raw_from_data).collect())
        .collect())
}

pub(crate) fn raw_from_data(d: &Data) -> RawCell {
    match d {
        Data::Empty => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::DateTime(dt) => RawCell::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        #[allow(unreachable_patterns)]
        other => RawCell::Text(other.to_string()),
    }
}

/// Styled header, banded rows, frozen header and auto column widths.
pub(crate) fn write_table(
    worksheet: &mut Worksheet,
    headers: &[&str],
    rows: &[Vec<OutCell>],
) -> Result<(), rust_xlsxwriter::XlsxError> {
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, cells) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };
        let base = Format::new()
            .set_background_color(band)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);

        for (c, cell) in cells.iter().enumerate() {
            let col = c as u16;
            match cell {
                OutCell::Empty => {
                    worksheet.write_blank(row, col, &base)?;
                }
                OutCell::Text(s) => {
                    worksheet.write_string_with_format(row, col, s, &base)?;
                }
                OutCell::Date(d) => {
                    let fmt = base.clone().set_num_format("yyyy-mm-dd");
                    worksheet.write_number_with_format(row, col, date_to_serial(*d), &fmt)?;
                }
                OutCell::Time(t) => {
                    let fmt = base.clone().set_num_format("hh:mm");
                    worksheet.write_number_with_format(row, col, time_to_serial(*t), &fmt)?;
                }
                OutCell::Number(n) => {
                    let fmt = base.clone().set_align(FormatAlign::Right);
                    worksheet.write_number_with_format(row, col, *n, &fmt)?;
                }
            }

            if let Some(w) = col_widths.get_mut(c) {
                *w = (*w).max(UnicodeWidthStr::width(cell.render().as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    Ok(())
}
