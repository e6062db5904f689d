//! Prelude module - common imports for rental-report users
//!
//! ```rust
//! use rental_report::prelude::*;
//! ```

pub use crate::{
    // Entry points
    export,
    export_named,

    CellValue,
    DirectorySink,
    ErrorKind,
    ExportError,
    ExportFormat,
    ExportOptions,
    ExportRequest,
    ExportResult,
    FileSink,

    // Domain records
    FinancialMovement,
    MaintenanceRequest,
    Rental,
    RentalReportAggregate,
    Unit,

    Workbook,
    Worksheet,
};
