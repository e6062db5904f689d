//! # rental-report-xlsx
//!
//! XLSX (Office Open XML) writer and reader for rental-report workbooks.
//!
//! The writer emits a genuine multi-sheet package: every worksheet of the
//! [`Workbook`](rental_report_core::Workbook) becomes its own part, in tab
//! order. Cell values are written inline (numbers, booleans, inline strings),
//! with a single default cell format and no formulas.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;

/// MIME type of an XLSX package
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
