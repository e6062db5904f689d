//! Errors raised while packaging or unpacking a workbook

use thiserror::Error;

pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container itself is not a readable zip archive
    #[error("zip container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML part: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A part parsed but its content does not describe a workbook
    #[error("not a valid workbook package: {0}")]
    InvalidFormat(String),

    #[error("package part not found: {0}")]
    MissingPart(String),

    /// Sheet names or cell addresses rejected by the cell model
    #[error(transparent)]
    Core(#[from] rental_report_core::Error),
}
