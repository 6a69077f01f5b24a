// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::summary_sheet_name;
use crate::export::{ExportModel, notify_export_success};
use crate::store::DEFAULT_SHEET;
use crate::store::cells::OutCell;
use crate::store::xlsx::write_table;
use crate::ui::messages::info;
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Export XLSX: the records sheet followed by one sheet per summary.
pub(crate) fn export_xlsx(model: &ExportModel, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    let records = workbook.add_worksheet();
    records.set_name(DEFAULT_SHEET).map_err(to_export_error)?;
    write_table(records, &model.headers, &model.rows).map_err(to_export_error)?;

    let mut used = vec![DEFAULT_SHEET.to_string()];

    for agg in &model.summaries {
        let mut headers: Vec<&str> = agg.group_by.iter().map(String::as_str).collect();
        headers.push(&agg.measure);

        let rows: Vec<Vec<OutCell>> = agg
            .sorted_by_total()
            .into_iter()
            .map(|(key, value)| {
                let mut cells: Vec<OutCell> = key.iter().map(|k| OutCell::Text(k.clone())).collect();
                cells.push(OutCell::Number(value));
                cells
            })
            .collect();

        let name = summary_sheet_name(agg, &used);
        let sheet = workbook.add_worksheet();
        sheet.set_name(&name).map_err(to_export_error)?;
        used.push(name);
        write_table(sheet, &headers, &rows).map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
