// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::ExportModel;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::text::export_txt;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use std::path::Path;

/// High level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `model` to `file` in the requested format.
    ///
    /// An empty model is not written: the user gets a warning instead.
    pub fn export(model: &ExportModel, format: ExportFormat, file: &str, force: bool) -> AppResult<()> {
        if model.is_empty() {
            warning("No records match the selected filters, nothing exported.");
            return Ok(());
        }

        let path = Path::new(file);
        ensure_writable(path, force)?;

        tracing::debug!(format = format.as_str(), path = %path.display(), rows = model.rows.len(), "export");

        match format {
            ExportFormat::Csv => export_csv(model, path)?,
            ExportFormat::Json => export_json(model, path)?,
            ExportFormat::Xlsx => export_xlsx(model, path)?,
            ExportFormat::Txt => export_txt(model, path)?,
        }

        Ok(())
    }
}
