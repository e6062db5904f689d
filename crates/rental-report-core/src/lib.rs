//! # rental-report-core
//!
//! Tabular data model shared by every output format of the rental report
//! export engine:
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing and its codec
//! - [`CellValue`] - The typed value held by one cell
//! - [`Worksheet`] - A sparse, range-tracked cell store for one named sheet
//! - [`Workbook`] - An ordered collection of uniquely named worksheets
//!
//! ## Example
//!
//! ```rust
//! use rental_report_core::{CellValue, Workbook, Worksheet};
//!
//! let sheet = Worksheet::from_rows(
//!     "Summary",
//!     vec![
//!         vec![CellValue::from("Total"), CellValue::from(1050.0)],
//!         vec![CellValue::Empty, CellValue::from(true)],
//!     ],
//! )
//! .unwrap();
//! assert_eq!(sheet.used_range().unwrap().to_string(), "A1:B2");
//!
//! let mut workbook = Workbook::new();
//! workbook.add_worksheet(sheet).unwrap();
//! assert_eq!(workbook.sheet_count(), 1);
//! ```

pub mod cell;
pub mod error;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{
    decode_address, decode_range, encode_address, encode_range, CellAddress, CellRange,
    CellStorage, CellValue,
};
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
