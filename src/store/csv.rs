//! CSV store: same canonical columns, dates as `YYYY-MM-DD`.

use super::cells::{RawCell, canonical_headers, parse_log_rows, row_to_cells};
use super::{LogStore, write_atomically};
use crate::errors::{AppError, AppResult};
use crate::models::LogTable;
use std::path::{Path, PathBuf};

pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl LogStore for CsvStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AppResult<LogTable> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "store not found, empty table");
            return Ok(LogTable::default());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| AppError::store(&self.path, e))?;

        let mut rows: Vec<Vec<RawCell>> = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| AppError::store(&self.path, e))?;
            rows.push(
                record
                    .iter()
                    .map(|v| {
                        if v.is_empty() {
                            RawCell::Empty
                        } else {
                            RawCell::Text(v.to_string())
                        }
                    })
                    .collect(),
            );
        }

        // BOM written by spreadsheet tools on the first header cell
        if let Some(RawCell::Text(first)) = rows.first_mut().and_then(|r| r.first_mut()) {
            *first = first.trim_start_matches('\u{feff}').to_string();
        }

        parse_log_rows(&self.path.display().to_string(), &rows)
    }

    fn write_all(&self, table: &LogTable) -> AppResult<()> {
        write_atomically(&self.path, |tmp| {
            let mut wtr = csv::Writer::from_path(tmp).map_err(|e| AppError::store(&self.path, e))?;

            wtr.write_record(canonical_headers())
                .map_err(|e| AppError::store(&self.path, e))?;

            for row in table {
                let cells: Vec<String> = row_to_cells(row).iter().map(|c| c.render()).collect();
                wtr.write_record(&cells)
                    .map_err(|e| AppError::store(&self.path, e))?;
            }

            wtr.flush().map_err(|e| AppError::store(&self.path, e))?;
            Ok(())
        })
    }
}
