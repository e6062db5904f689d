//! # rental-report-csv
//!
//! CSV reader and writer for rental-report worksheets.
//!
//! Besides plain one-sheet CSV, this crate writes and reads *sectioned*
//! documents: several worksheets in one text blob, each introduced by a
//! `=== TITLE ===` line.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, FieldPolicy, LineTerminator};
pub use reader::CsvReader;
pub use writer::{section_header, CsvSection, CsvWriter};
