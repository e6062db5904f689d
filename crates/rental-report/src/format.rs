//! Output format selector

use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Structured JSON document
    Json,
    /// Sectioned CSV document
    Csv,
    /// Multi-sheet XLSX workbook
    Workbook,
    /// Printable HTML document
    Print,
}

impl ExportFormat {
    /// All formats
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Workbook,
        ExportFormat::Print,
    ];

    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Workbook => "xlsx",
            ExportFormat::Print => "html",
        }
    }

    /// MIME type of the produced bytes
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Workbook => rental_report_xlsx::XLSX_MIME_TYPE,
            ExportFormat::Print => "text/html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Workbook => "workbook",
            ExportFormat::Print => "print",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" | "workbook" => Ok(ExportFormat::Workbook),
            "html" | "print" | "pdf" => Ok(ExportFormat::Print),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}
