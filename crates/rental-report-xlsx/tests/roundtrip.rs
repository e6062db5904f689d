//! Workbook write/read tests

use pretty_assertions::assert_eq;
use rental_report_core::{CellValue, Workbook, Worksheet};
use rental_report_xlsx::{XlsxReader, XlsxWriter};
use std::io::Cursor;
use tempfile::NamedTempFile;

fn sample_workbook() -> Workbook {
    let mut wb = Workbook::new();
    wb.add_worksheet_from_rows(
        "Rental Details",
        vec![
            vec![CellValue::from("Contract Number"), CellValue::from("RC-001")],
            vec![CellValue::from("Monthly Price"), CellValue::from(1200.0)],
            vec![CellValue::from("Is Monthly"), CellValue::from(true)],
        ],
    )
    .unwrap();
    wb.add_worksheet_from_rows(
        "Financial Movements",
        vec![
            vec![
                CellValue::from("Description"),
                CellValue::from("Credit"),
                CellValue::from("Debit"),
            ],
            vec![
                CellValue::from("Rent & fees <March>"),
                CellValue::from(1200.0),
                CellValue::Empty,
            ],
            vec![
                CellValue::from("Plumbing"),
                CellValue::Empty,
                CellValue::from(150.5),
            ],
        ],
    )
    .unwrap();
    wb.add_worksheet(Worksheet::new("Maintenance")).unwrap();
    wb
}

#[test]
fn test_sheets_survive_in_tab_order() {
    let bytes = XlsxWriter::to_bytes(&sample_workbook()).unwrap();
    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();

    assert_eq!(
        wb.sheet_names(),
        vec!["Rental Details", "Financial Movements", "Maintenance"]
    );
}

#[test]
fn test_values_survive() {
    let bytes = XlsxWriter::to_bytes(&sample_workbook()).unwrap();
    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();

    let details = wb.require_worksheet("Rental Details").unwrap();
    assert_eq!(details.get_value("B1").unwrap(), CellValue::text("RC-001"));
    assert_eq!(details.get_value("B2").unwrap(), CellValue::Number(1200.0));
    assert_eq!(details.get_value("B3").unwrap(), CellValue::Boolean(true));

    let movements = wb.require_worksheet("Financial Movements").unwrap();
    assert_eq!(
        movements.get_value("A2").unwrap(),
        CellValue::text("Rent & fees <March>")
    );
    assert_eq!(movements.get_value("C2").unwrap(), CellValue::Empty);
    assert_eq!(movements.get_value("C3").unwrap(), CellValue::Number(150.5));
    assert_eq!(movements.used_range().unwrap().to_string(), "A1:C3");
}

#[test]
fn test_empty_sheet_stays_empty() {
    let bytes = XlsxWriter::to_bytes(&sample_workbook()).unwrap();
    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();

    let maintenance = wb.require_worksheet("Maintenance").unwrap();
    assert!(maintenance.is_empty());
    assert!(maintenance.used_range().is_none());
}

#[test]
fn test_write_and_read_file() {
    let file = NamedTempFile::new().unwrap();
    XlsxWriter::write_file(&sample_workbook(), file.path()).unwrap();

    let wb = XlsxReader::read_file(file.path()).unwrap();
    assert_eq!(wb.sheet_count(), 3);
}

#[test]
fn test_not_a_package() {
    let result = XlsxReader::read(Cursor::new(b"Date,Credit\n".to_vec()));
    assert!(result.is_err());
}

#[test]
fn test_surrounding_whitespace_survives() {
    let mut wb = Workbook::new();
    wb.add_worksheet_from_rows("Notes", vec![vec!["  Rent  ", "   ", "x"]])
        .unwrap();

    let bytes = XlsxWriter::to_bytes(&wb).unwrap();
    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();

    let notes = wb.worksheet(0).unwrap();
    assert_eq!(notes.get_value("A1").unwrap(), CellValue::text("  Rent  "));
    assert_eq!(notes.get_value("B1").unwrap(), CellValue::text("   "));
    assert_eq!(notes.get_value("C1").unwrap(), CellValue::text("x"));
    assert_eq!(notes.cell_count(), 3);
}

#[test]
fn test_control_characters_survive() {
    let description = "Leak\u{1}under\u{B}sink\r\nsee _x0041_";
    let mut wb = Workbook::new();
    wb.add_worksheet_from_rows(
        "Maintenance",
        vec![vec![CellValue::from(description), CellValue::from(false)]],
    )
    .unwrap();

    let bytes = XlsxWriter::to_bytes(&wb).unwrap();
    let wb = XlsxReader::read(Cursor::new(bytes)).unwrap();

    let sheet = wb.worksheet(0).unwrap();
    assert_eq!(sheet.get_value("A1").unwrap(), CellValue::text(description));
    assert_eq!(sheet.get_value("B1").unwrap().as_bool(), Some(false));
    assert!(wb.worksheet(1).is_none());
}
