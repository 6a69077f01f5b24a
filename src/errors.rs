//! Unified application error type.
//! All modules (store, engine, ingest, core, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Storage error on '{path}': {reason}")]
    Store { path: String, reason: String },

    #[error("Unsupported storage file '{0}' (use .xlsx or .csv)")]
    UnsupportedStore(String),

    #[error("Missing required column(s) in {source_name}: {}", .missing.join(", "))]
    Schema {
        source_name: String,
        missing: Vec<String>,
    },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid shift: {0} (use Morning, Afternoon or Night)")]
    InvalidShift(String),

    #[error("Invalid hours value: {0}")]
    InvalidHours(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("End time {end} is before start time {start}")]
    NegativeDuration { start: String, end: String },

    #[error("Hours are required: pass --hours or both --in and --out")]
    MissingHours,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    pub fn store<P: AsRef<std::path::Path>, E: std::fmt::Display>(path: P, err: E) -> Self {
        AppError::Store {
            path: path.as_ref().display().to_string(),
            reason: err.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
