//! Export error types

use rental_report_core::Error as CoreError;
use rental_report_csv::CsvError;
use rental_report_xlsx::XlsxError;
use thiserror::Error;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors returned by the export facade
///
/// No export produces partial output: when an error is returned, no bytes
/// were handed back.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The format selector names no known output format
    #[error("Unsupported export format: '{0}'")]
    UnsupportedFormat(String),

    /// The aggregate carries no rental record
    #[error("Nothing to export: the aggregate has no rental record")]
    EmptyAggregate,

    /// Cell model error while building a worksheet or workbook
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// XLSX packaging error
    #[error("XLSX error: {0}")]
    Xlsx(#[from] XlsxError),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat classification of [`ExportError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed cell or range address
    InvalidAddress,
    /// Two sheets with the same name in one workbook
    DuplicateSheetName,
    /// Unknown format selector
    UnsupportedFormat,
    /// No rental record supplied
    EmptyAggregate,
    /// Any other failure while producing bytes
    Serialization,
}

impl ExportError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ExportError::EmptyAggregate => ErrorKind::EmptyAggregate,
            ExportError::Core(e) => core_kind(e),
            ExportError::Csv(CsvError::Core(e)) => core_kind(e),
            ExportError::Xlsx(XlsxError::Core(e)) => core_kind(e),
            ExportError::Csv(_) | ExportError::Xlsx(_) | ExportError::Json(_) => {
                ErrorKind::Serialization
            }
        }
    }
}

fn core_kind(error: &CoreError) -> ErrorKind {
    match error {
        CoreError::InvalidAddress(_) | CoreError::InvalidRange(_) => ErrorKind::InvalidAddress,
        CoreError::DuplicateSheetName(_) => ErrorKind::DuplicateSheetName,
        _ => ErrorKind::Serialization,
    }
}
