//! Export options

use chrono::{DateTime, Utc};
use rental_report_csv::CsvWriteOptions;

/// Options shared by every output format
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Symbol prefixed to money amounts in the printable document (default: `$`)
    pub currency_symbol: String,
    /// Text shown for maintenance requests that were never resolved
    pub not_resolved_marker: String,
    /// Timestamp stamped into the JSON and printable outputs.
    /// `None` uses the current time.
    pub exported_at: Option<DateTime<Utc>>,
    /// CSV layout
    pub csv: CsvWriteOptions,
    /// Heading of the printable document
    pub document_title: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            not_resolved_marker: "Not resolved".to_string(),
            exported_at: None,
            csv: CsvWriteOptions::default(),
            document_title: "Rental Report".to_string(),
        }
    }
}

impl ExportOptions {
    /// The export timestamp, falling back to now
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.exported_at.unwrap_or_else(Utc::now)
    }

    /// Pin the export timestamp
    pub fn with_exported_at(mut self, at: DateTime<Utc>) -> Self {
        self.exported_at = Some(at);
        self
    }
}
