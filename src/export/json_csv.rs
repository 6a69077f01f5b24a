// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{SummaryExport, row_to_json};
use crate::export::{ExportModel, notify_export_success};
use crate::ui::messages::info;
use serde_json::json;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed: records plus summaries.
pub(crate) fn export_json(model: &ExportModel, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let records: Vec<_> = model
        .rows
        .iter()
        .map(|r| row_to_json(&model.headers, r))
        .collect();
    let summaries: Vec<SummaryExport> = model.summaries.iter().map(SummaryExport::from).collect();

    let doc = json!({
        "title": model.title,
        "records": records,
        "summaries": summaries,
    });

    let json_data = serde_json::to_string_pretty(&doc)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV: filtered records only, header included.
pub(crate) fn export_csv(model: &ExportModel, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    wtr.write_record(&model.headers)
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    for row in &model.rows {
        let cells: Vec<String> = row.iter().map(|c| c.render()).collect();
        wtr.write_record(&cells)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    notify_export_success("CSV", path);
    Ok(())
}
