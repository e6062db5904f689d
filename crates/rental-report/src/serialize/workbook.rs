//! Three-sheet XLSX workbook
//!
//! | sheet | table | trailing summary |
//! |---|---|---|
//! | Rental Details | rental fields | unit fields, when there is a unit |
//! | Financial Movements | movements | income, expenses, net income |
//! | Maintenance | maintenance requests | request and open-request counts |
//!
//! Each summary block follows its table after one blank row.

use rental_report_core::{CellValue, Workbook};
use rental_report_xlsx::XlsxWriter;

use crate::error::Result;
use crate::tables::ReportTables;

/// Sheet names, in tab order
pub const SHEET_NAMES: [&str; 3] = ["Rental Details", "Financial Movements", "Maintenance"];

/// Build the report workbook
pub fn build_workbook(tables: &ReportTables) -> Result<Workbook> {
    let [details_name, movements_name, maintenance_name] = SHEET_NAMES;
    let mut workbook = Workbook::new();

    let mut details = tables.rental.rows();
    if let Some(unit) = &tables.unit {
        details.push(Vec::new());
        details.push(vec![CellValue::text(unit.title)]);
        details.extend(unit.rows());
    }
    workbook.add_worksheet_from_rows(details_name, details)?;

    let mut movements = tables.movements.to_rows();
    movements.push(Vec::new());
    movements.extend(tables.summary.rows());
    workbook.add_worksheet_from_rows(movements_name, movements)?;

    let mut maintenance = tables.maintenance.to_rows();
    maintenance.push(Vec::new());
    maintenance.extend(tables.maintenance_summary_rows());
    workbook.add_worksheet_from_rows(maintenance_name, maintenance)?;

    Ok(workbook)
}

/// Render the tables as an XLSX package
pub fn to_xlsx(tables: &ReportTables) -> Result<Vec<u8>> {
    let workbook = build_workbook(tables)?;
    Ok(XlsxWriter::to_bytes(&workbook)?)
}
