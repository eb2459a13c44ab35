//! Error types for lingua-export.

use thiserror::Error;

/// All errors that can arise from data exports.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writer error.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure while flushing the CSV writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV writer buffer was not valid UTF-8 (cannot happen for the
    /// string records we feed it, but the conversion is fallible).
    #[error("CSV export produced invalid UTF-8: {0}")]
    CsvUtf8(#[from] std::string::FromUtf8Error),

    /// JSON serialization error.
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested subproject does not exist in the project.
    #[error("subproject '{subproject}' not found in project '{project}'")]
    SubprojectNotFound { project: String, subproject: String },
}
