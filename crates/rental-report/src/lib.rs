//! # rental-report
//!
//! Report export engine for rental contracts.
//!
//! A [`RentalReportAggregate`] (a rental with its unit, financial movements
//! and maintenance requests) is projected once into [`ReportTables`] and then
//! rendered into one of four formats:
//!
//! - JSON - the lossless reference document
//! - CSV - one document with `=== SECTION ===` header lines
//! - XLSX - a workbook with one sheet per table
//! - Print - a self-contained HTML page ready for printing
//!
//! ## Example
//!
//! ```rust
//! use rental_report::prelude::*;
//!
//! let aggregate = RentalReportAggregate::new(Rental {
//!     contract_number: "RC-001".into(),
//!     current_price: 1200.0,
//!     ..Default::default()
//! });
//!
//! let result = export_named(&aggregate, "csv", "rc-001", &ExportOptions::default()).unwrap();
//! assert_eq!(result.filename, "rc-001.csv");
//! assert_eq!(result.mime_type, "text/csv");
//! ```

pub mod error;
pub mod export;
pub mod format;
pub mod model;
pub mod options;
pub mod prelude;
pub mod serialize;
pub mod sink;
pub mod tables;

pub use error::{ErrorKind, ExportError, Result};
pub use export::{export, export_named, ExportRequest, ExportResult};
pub use format::ExportFormat;
pub use model::{FinancialMovement, MaintenanceRequest, Rental, RentalReportAggregate, Unit};
pub use options::ExportOptions;
pub use sink::{DirectorySink, FileSink};
pub use tables::{FinancialSummary, ReportTables};

// Re-export the cell model and I/O types
pub use rental_report_core::{
    decode_address, decode_range, encode_address, encode_range, CellAddress, CellRange,
    CellValue, Workbook, Worksheet,
};
pub use rental_report_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, FieldPolicy, LineTerminator,
};
pub use rental_report_xlsx::{XlsxError, XlsxReader, XlsxWriter};
