//! Sectioned CSV report
//!
//! Three sections, in order: rental details (followed by the unit fields
//! when there is a unit), financial movements (followed by the summary
//! rows) and maintenance requests.

use rental_report_core::{CellValue, Worksheet};
use rental_report_csv::{CsvSection, CsvWriteOptions, CsvWriter};

use crate::error::Result;
use crate::tables::ReportTables;

/// Section titles, in document order
pub const SECTION_TITLES: [&str; 3] = [
    "Rental Details",
    "Financial Movements",
    "Maintenance Requests",
];

/// Render the tables as one sectioned CSV document
pub fn to_csv(tables: &ReportTables, options: &CsvWriteOptions) -> Result<Vec<u8>> {
    let [details_title, movements_title, maintenance_title] = SECTION_TITLES;

    let mut details = tables.rental.rows();
    if let Some(unit) = &tables.unit {
        details.extend(unit.rows());
    }
    let details = Worksheet::from_rows(details_title, details)?;

    let mut movements = tables.movements.to_rows();
    movements.extend(tables.summary.rows());
    let movements = Worksheet::from_rows(movements_title, movements)?;

    let maintenance: Vec<Vec<CellValue>> = tables.maintenance.to_rows();
    let maintenance = Worksheet::from_rows(maintenance_title, maintenance)?;

    let bytes = CsvWriter::sections_to_bytes(
        &[
            CsvSection::new(details_title, &details),
            CsvSection::new(movements_title, &movements),
            CsvSection::new(maintenance_title, &maintenance),
        ],
        options,
    )?;
    Ok(bytes)
}
