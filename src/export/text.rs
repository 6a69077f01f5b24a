// src/export/text.rs

use crate::errors::AppResult;
use crate::export::{ExportModel, notify_export_success};
use crate::ui::messages::info;
use crate::utils::formatting::strip_ansi;
use std::fs;
use std::path::Path;

/// Export the text report, ANSI sequences removed.
pub(crate) fn export_txt(model: &ExportModel, path: &Path) -> AppResult<()> {
    info(format!("Exporting to TXT: {}", path.display()));

    fs::write(path, strip_ansi(&model.text))?;

    notify_export_success("TXT", path);
    Ok(())
}
