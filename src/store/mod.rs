//! Log store adapters.
//!
//! A store persists one table of log records (sheet `Logs` by default).
//! Appending is a read-modify-write cycle: the existing rows are loaded,
//! the new row is added and the whole set is rewritten through a temporary
//! sibling file that is then renamed over the target.

pub mod cells;
pub mod csv;
pub mod xlsx;

use crate::errors::{AppError, AppResult};
use crate::models::{LogRecord, LogRow, LogTable};
use crate::utils::path::{extension_lower, temp_sibling};
use std::fs;
use std::path::Path;

pub use self::csv::CsvStore;
pub use self::xlsx::XlsxStore;
pub use cells::RawCell;

pub const DEFAULT_SHEET: &str = "Logs";

pub trait LogStore {
    fn path(&self) -> &Path;

    /// All persisted rows. A store that does not exist yet loads as an
    /// empty table.
    fn load(&self) -> AppResult<LogTable>;

    /// Replace the persisted content with `table`.
    fn write_all(&self, table: &LogTable) -> AppResult<()>;

    /// Add one record. Creates the store with its header on first use.
    fn append(&self, record: &LogRecord) -> AppResult<()> {
        let mut table = self.load()?;
        table.push(LogRow::from(record));
        self.write_all(&table)?;

        tracing::info!(
            path = %self.path().display(),
            rows = table.len(),
            "record appended"
        );
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path().exists()
    }
}

/// Pick the adapter matching the file extension.
pub fn open(path: &Path, sheet: &str) -> AppResult<Box<dyn LogStore>> {
    match extension_lower(path).as_str() {
        "xlsx" => Ok(Box::new(XlsxStore::new(path, sheet))),
        "csv" => Ok(Box::new(CsvStore::new(path))),
        _ => Err(AppError::UnsupportedStore(path.display().to_string())),
    }
}

/// Write through `writer` into a temporary sibling, then move it over
/// `path`. On failure the temporary file is removed and `path` is untouched.
pub(crate) fn write_atomically<F>(path: &Path, writer: F) -> AppResult<()>
where
    F: FnOnce(&Path) -> AppResult<()>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| AppError::store(path, e))?;
    }

    let tmp = temp_sibling(path);
    if let Err(e) = writer(&tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        AppError::store(path, e)
    })
}
