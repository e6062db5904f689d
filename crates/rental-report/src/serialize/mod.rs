//! Output formats
//!
//! All serializers read the same [`ReportTables`](crate::tables::ReportTables)
//! and differ only in byte layout.

pub mod csv;
pub mod json;
pub mod print;
pub mod workbook;

pub use self::csv::to_csv;
pub use self::json::to_json;
pub use self::print::PrintRenderer;
pub use self::workbook::{build_workbook, to_xlsx};
