//! End-to-end export of one rental in every format

mod common;

use common::{options, scenario};
use pretty_assertions::assert_eq;
use rental_report::prelude::*;
use rental_report::XlsxReader;
use std::io::Cursor;

fn export_as(format: ExportFormat) -> ExportResult {
    let aggregate = scenario();
    export(&ExportRequest::new(&aggregate, format, "rc-001"), &options()).unwrap()
}

#[test]
fn test_json_export() {
    let result = export_as(ExportFormat::Json);
    assert_eq!(result.filename, "rc-001.json");
    assert_eq!(result.mime_type, "application/json");

    let doc: serde_json::Value = serde_json::from_slice(&result.bytes).unwrap();
    assert_eq!(doc["financialSummary"]["netIncome"].as_f64(), Some(1050.0));
    assert_eq!(doc["financialSummary"]["totalIncome"].as_f64(), Some(1200.0));
    assert_eq!(doc["financialSummary"]["totalExpenses"].as_f64(), Some(150.0));
    assert_eq!(doc["rental"]["contractNumber"], "RC-001");
    assert_eq!(doc["rental"]["securityDeposit"].as_f64(), Some(2400.0));
    assert_eq!(doc["rental"]["monthsCount"].as_f64(), Some(12.0));
    assert_eq!(doc["rental"]["restMonthsLeft"].as_f64(), Some(5.0));
    assert_eq!(doc["unit"]["number"], "U-5");
    assert_eq!(doc["financialMovements"][0]["date"], "January 5, 2024");
    assert_eq!(doc["financialMovements"][1]["balance"].as_f64(), Some(1050.0));
    assert_eq!(doc["maintenanceRequests"].as_array().map(Vec::len), Some(0));
    assert_eq!(doc["exportDate"], "2024-05-01T08:00:00+00:00");
}

#[test]
fn test_csv_export() {
    let result = export_as(ExportFormat::Csv);
    assert_eq!(result.filename, "rc-001.csv");
    assert_eq!(result.mime_type, "text/csv");

    let text = String::from_utf8(result.bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert!(text.contains("\r\n"));
    assert_eq!(lines[0], "=== RENTAL DETAILS ===");
    assert!(lines.contains(&"Unit Number,U-5"));
    assert!(lines.contains(&"Total Income,,,1200,,"));
    assert!(lines.contains(&"Total Expenses,,,,150,"));
    assert!(lines.contains(&"Net Income,,,1050,,"));
    assert!(lines.contains(&"=== MAINTENANCE REQUESTS ==="));
}

#[test]
fn test_workbook_export() {
    let result = export_as(ExportFormat::Workbook);
    assert_eq!(result.filename, "rc-001.xlsx");
    assert_eq!(
        result.mime_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let workbook = XlsxReader::read(Cursor::new(result.bytes)).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["Rental Details", "Financial Movements", "Maintenance"]
    );

    let movements = workbook.require_worksheet("Financial Movements").unwrap();
    let rows = movements.rows();
    // header, two movements, blank spacer, three summary rows
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[1][1], CellValue::text("Rent"));
    assert_eq!(rows[2][1], CellValue::text("Repair"));
    assert!(rows[3].iter().all(CellValue::is_empty));
    assert_eq!(rows[4][0], CellValue::text("Total Income"));
    assert_eq!(rows[6][0], CellValue::text("Net Income"));
    assert_eq!(rows[6][3], CellValue::Number(1050.0));
}

#[test]
fn test_print_export() {
    let result = export_as(ExportFormat::Print);
    assert_eq!(result.filename, "rc-001.html");
    assert_eq!(result.mime_type, "text/html");

    let html = String::from_utf8(result.bytes).unwrap();
    assert!(html.contains("<h2>Rental Details</h2>"));
    assert!(html.contains("<h2>Unit Details</h2>"));
    assert!(html.contains("<h2>Financial Movements</h2>"));
    assert!(html.contains("<div>$2400.00</div>"));
    assert!(html.contains("<div>$1050.00</div>"));
    assert!(!html.contains("Maintenance"));
}

#[test]
fn test_missing_rental() {
    let aggregate = RentalReportAggregate::default();
    let err = export_named(&aggregate, "json", "empty", &options()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyAggregate);
}

#[test]
fn test_aggregate_from_api_json() {
    let aggregate: RentalReportAggregate = serde_json::from_str(
        r#"{
            "rental": {"contractNumber": "RC-001", "currentPrice": 1200, "securityDeposit": 2400,
                       "monthsCount": 12, "restMonthsLeft": 5},
            "unit": {"number": "U-5"},
            "financialMovements": [
                {"credit": 1200, "debit": 0, "description": "Rent", "date": "2024-01-05"},
                {"credit": 0, "debit": 150, "description": "Repair"}
            ],
            "maintenanceRequests": []
        }"#,
    )
    .unwrap();

    assert_eq!(aggregate, scenario());
}
