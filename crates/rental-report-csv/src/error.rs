//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur while reading or writing CSV
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A sectioned document that does not follow the section layout
    #[error("Malformed section at record {record}: {message}")]
    Section { record: usize, message: String },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] rental_report_core::Error),
}
