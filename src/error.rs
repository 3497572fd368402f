//! Structural failures that abort the current operation.
//!
//! Per-file and per-row problems are not errors; they are reported as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s and processing continues.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Failures reported to the caller of an import, scan or export
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Scan root does not exist
    #[error("directory does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Scan root exists but is not a directory
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Roster file could not be read or has no usable header
    #[error("failed to import roster from {}: {reason}", path.display())]
    ImportRead {
        /// Roster file path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Export target could not be written
    #[error("failed to export statistics to {}: {reason}", path.display())]
    ExportWrite {
        /// Export file path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Nothing to export
    #[error("no statistics to export")]
    EmptyExport,

    /// Configuration file could not be loaded
    #[error("invalid configuration {}: {reason}", path.display())]
    Config {
        /// Config file path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet workbook could not be read
    #[error("workbook read error: {0}")]
    WorkbookRead(#[from] calamine::Error),

    /// Spreadsheet workbook could not be written
    #[error("workbook write error: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
