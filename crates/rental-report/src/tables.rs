//! Tabular projections of the domain records
//!
//! Every output format renders the tables built here, so a date or amount
//! is formatted exactly once. Dates are long calendar text
//! ("January 5, 2024"); amounts stay numbers and only the printable
//! document adds a currency symbol to them.

use chrono::{DateTime, NaiveDate, Utc};
use rental_report_core::CellValue;
use serde::Serialize;

use crate::error::{ExportError, Result};
use crate::model::{FinancialMovement, MaintenanceRequest, Rental, RentalReportAggregate, Unit};

/// How a value is meant to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Plain,
    Currency,
}

/// One labelled value of a key/value table
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// camelCase key used by the JSON output
    pub key: &'static str,
    /// Human label used by the tabular and printable outputs
    pub label: &'static str,
    pub value: CellValue,
    pub kind: ValueKind,
}

impl Field {
    fn plain(key: &'static str, label: &'static str, value: impl Into<CellValue>) -> Self {
        Self {
            key,
            label,
            value: value.into(),
            kind: ValueKind::Plain,
        }
    }

    fn currency(key: &'static str, label: &'static str, value: impl Into<CellValue>) -> Self {
        Self {
            key,
            label,
            value: value.into(),
            kind: ValueKind::Currency,
        }
    }
}

/// A two-column table of labelled values
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueTable {
    pub title: &'static str,
    pub fields: Vec<Field>,
}

impl KeyValueTable {
    /// `[label, value]` rows
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        self.fields
            .iter()
            .map(|f| vec![CellValue::text(f.label), f.value.clone()])
            .collect()
    }
}

/// A column of a [`ListTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ValueKind,
}

const fn column(key: &'static str, label: &'static str, kind: ValueKind) -> Column {
    Column { key, label, kind }
}

/// A table with a header row and one row per record
#[derive(Debug, Clone, PartialEq)]
pub struct ListTable {
    pub title: &'static str,
    pub columns: Vec<Column>,
    /// Data rows, each as wide as `columns`
    pub rows: Vec<Vec<CellValue>>,
}

impl ListTable {
    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The header row of column labels
    pub fn header(&self) -> Vec<CellValue> {
        self.columns.iter().map(|c| CellValue::text(c.label)).collect()
    }

    /// Header row followed by the data rows
    pub fn to_rows(&self) -> Vec<Vec<CellValue>> {
        std::iter::once(self.header())
            .chain(self.rows.iter().cloned())
            .collect()
    }
}

/// Totals over the financial movements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Sum of all credits
    pub total_income: f64,
    /// Sum of all debits
    pub total_expenses: f64,
    /// `total_income - total_expenses`
    pub net_income: f64,
}

impl FinancialSummary {
    /// Summarize a list of movements
    pub fn from_movements(movements: &[FinancialMovement]) -> Self {
        let total_income: f64 = movements.iter().map(|m| m.credit).sum();
        let total_expenses: f64 = movements.iter().map(|m| m.debit).sum();
        Self {
            total_income,
            total_expenses,
            net_income: total_income - total_expenses,
        }
    }

    /// Summary rows aligned with the movements table: income and net income
    /// sit in the Credit column, expenses in the Debit column.
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        let row = |label: &str, col: usize, amount: f64| {
            let mut row = vec![CellValue::Empty; MOVEMENT_COLUMNS.len()];
            row[0] = CellValue::text(label);
            row[col] = CellValue::Number(amount);
            row
        };
        vec![
            row("Total Income", CREDIT_COL, self.total_income),
            row("Total Expenses", DEBIT_COL, self.total_expenses),
            row("Net Income", CREDIT_COL, self.net_income),
        ]
    }
}

/// Every table of one report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTables {
    /// Contract number of the rental, used in titles
    pub contract_number: String,
    pub rental: KeyValueTable,
    pub unit: Option<KeyValueTable>,
    pub movements: ListTable,
    pub summary: FinancialSummary,
    pub maintenance: ListTable,
    /// Requests without a resolution date
    pub open_requests: usize,
}

impl ReportTables {
    /// Build all tables for an aggregate.
    ///
    /// Fails with [`ExportError::EmptyAggregate`] when there is no rental.
    pub fn build(aggregate: &RentalReportAggregate, not_resolved_marker: &str) -> Result<Self> {
        let rental = aggregate
            .rental
            .as_ref()
            .ok_or(ExportError::EmptyAggregate)?;

        Ok(Self {
            contract_number: rental.contract_number.clone(),
            rental: rental_table(rental),
            unit: aggregate.unit.as_ref().map(unit_table),
            movements: movements_table(&aggregate.financial_movements),
            summary: FinancialSummary::from_movements(&aggregate.financial_movements),
            maintenance: maintenance_table(&aggregate.maintenance_requests, not_resolved_marker),
            open_requests: aggregate
                .maintenance_requests
                .iter()
                .filter(|r| r.is_open())
                .count(),
        })
    }

    /// Rows of the maintenance summary block
    pub fn maintenance_summary_rows(&self) -> Vec<Vec<CellValue>> {
        vec![
            vec![
                CellValue::text("Total Requests"),
                CellValue::from(self.maintenance.rows.len()),
            ],
            vec![
                CellValue::text("Open Requests"),
                CellValue::from(self.open_requests),
            ],
        ]
    }
}

/// Long calendar form, e.g. "January 5, 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn date_value(date: Option<NaiveDate>) -> CellValue {
    date.map(long_date).into()
}

fn timestamp_value(at: Option<DateTime<Utc>>) -> CellValue {
    date_value(at.map(|at| at.date_naive()))
}

/// Blank strings are missing values, not empty text
fn text_value(text: &str) -> CellValue {
    if text.is_empty() {
        CellValue::Empty
    } else {
        CellValue::text(text)
    }
}

/// Contract summary
pub fn rental_table(rental: &Rental) -> KeyValueTable {
    KeyValueTable {
        title: "Rental Details",
        fields: vec![
            Field::plain("contractNumber", "Contract Number", text_value(&rental.contract_number)),
            Field::plain("status", "Status", text_value(&rental.status)),
            Field::plain("moveType", "Move Type", text_value(&rental.move_type)),
            Field::plain("rentalSource", "Rental Source", text_value(&rental.rental_source)),
            Field::plain("startDate", "Start Date", date_value(rental.start_date)),
            Field::plain("endDate", "End Date", date_value(rental.end_date)),
            Field::currency("currentPrice", "Current Price", rental.current_price),
            Field::currency("startingPrice", "Starting Price", rental.starting_price),
            Field::currency("securityDeposit", "Security Deposit", rental.security_deposit),
            Field::plain("monthsCount", "Total Months", rental.months_count),
            Field::plain("restMonthsLeft", "Months Left", rental.rest_months_left),
            Field::plain("roommates", "Roommates", rental.roommates),
            Field::plain("isMonthly", "Monthly Payments", rental.is_monthly),
        ],
    }
}

/// Unit details
pub fn unit_table(unit: &Unit) -> KeyValueTable {
    KeyValueTable {
        title: "Unit Details",
        fields: vec![
            Field::plain("number", "Unit Number", text_value(&unit.number)),
            Field::plain("unitType", "Unit Type", text_value(&unit.unit_type)),
            Field::plain("status", "Unit Status", text_value(&unit.status)),
            Field::plain("address", "Address", text_value(&unit.address)),
            Field::plain("city", "City", text_value(&unit.city)),
            Field::plain("country", "Country", text_value(&unit.country)),
            Field::plain("description", "Description", text_value(&unit.description)),
            Field::currency("processingCost", "Processing Cost", unit.processing_cost),
        ],
    }
}

const CREDIT_COL: usize = 3;
const DEBIT_COL: usize = 4;

const MOVEMENT_COLUMNS: [Column; 6] = [
    column("date", "Date", ValueKind::Plain),
    column("description", "Description", ValueKind::Plain),
    column("type", "Type", ValueKind::Plain),
    column("credit", "Credit", ValueKind::Currency),
    column("debit", "Debit", ValueKind::Currency),
    column("balance", "Balance", ValueKind::Currency),
];

/// One row per movement, in input order, with a running balance
pub fn movements_table(movements: &[FinancialMovement]) -> ListTable {
    let mut balance = 0.0;
    let rows = movements
        .iter()
        .map(|m| {
            balance += m.net();
            vec![
                date_value(m.date),
                text_value(&m.description),
                text_value(&m.movement_type),
                CellValue::Number(m.credit),
                CellValue::Number(m.debit),
                CellValue::Number(balance),
            ]
        })
        .collect();

    ListTable {
        title: "Financial Movements",
        columns: MOVEMENT_COLUMNS.to_vec(),
        rows,
    }
}

const MAINTENANCE_COLUMNS: [Column; 7] = [
    column("title", "Title", ValueKind::Plain),
    column("description", "Description", ValueKind::Plain),
    column("status", "Status", ValueKind::Plain),
    column("priority", "Priority", ValueKind::Plain),
    column("createdAt", "Created", ValueKind::Plain),
    column("resolvedAt", "Resolved", ValueKind::Plain),
    column("reporter", "Reported By", ValueKind::Plain),
];

/// One row per request, unresolved ones carrying `not_resolved_marker`
pub fn maintenance_table(requests: &[MaintenanceRequest], not_resolved_marker: &str) -> ListTable {
    let rows = requests
        .iter()
        .map(|r| {
            let resolved = match r.resolved_at {
                Some(_) => timestamp_value(r.resolved_at),
                None => CellValue::text(not_resolved_marker),
            };
            vec![
                text_value(&r.title),
                text_value(&r.description),
                text_value(&r.status),
                text_value(&r.priority),
                timestamp_value(r.created_at),
                resolved,
                text_value(&r.reporter),
            ]
        })
        .collect();

    ListTable {
        title: "Maintenance Requests",
        columns: MAINTENANCE_COLUMNS.to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn movement(credit: f64, debit: f64, description: &str) -> FinancialMovement {
        FinancialMovement {
            credit,
            debit,
            description: description.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(long_date(date), "January 5, 2024");
    }

    #[test]
    fn test_rental_table() {
        let rental = Rental {
            contract_number: "RC-001".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            current_price: 1200.0,
            is_monthly: true,
            ..Default::default()
        };
        let table = rental_table(&rental);
        let value = |key: &str| {
            table
                .fields
                .iter()
                .find(|f| f.key == key)
                .map(|f| f.value.clone())
                .unwrap()
        };

        assert_eq!(value("contractNumber"), CellValue::text("RC-001"));
        assert_eq!(value("status"), CellValue::Empty);
        assert_eq!(value("startDate"), CellValue::text("March 1, 2024"));
        assert_eq!(value("endDate"), CellValue::Empty);
        assert_eq!(value("currentPrice"), CellValue::Number(1200.0));
        assert_eq!(value("isMonthly"), CellValue::Boolean(true));
        assert_eq!(
            table.rows()[0],
            vec![CellValue::text("Contract Number"), CellValue::text("RC-001")]
        );
    }

    #[test]
    fn test_movements_running_balance() {
        let table = movements_table(&[movement(1200.0, 0.0, "Rent"), movement(0.0, 150.0, "Repair")]);

        assert_eq!(table.width(), 6);
        let balances: Vec<_> = table.rows.iter().map(|r| r[5].clone()).collect();
        assert_eq!(
            balances,
            vec![CellValue::Number(1200.0), CellValue::Number(1050.0)]
        );
        assert_eq!(table.to_rows().len(), 3);
    }

    #[test]
    fn test_financial_summary() {
        let summary = FinancialSummary::from_movements(&[
            movement(1200.0, 0.0, "Rent"),
            movement(0.0, 150.0, "Repair"),
        ]);
        assert_eq!(summary.total_income, 1200.0);
        assert_eq!(summary.total_expenses, 150.0);
        assert_eq!(summary.net_income, 1050.0);

        let rows = summary.rows();
        assert_eq!(rows[0][0], CellValue::text("Total Income"));
        assert_eq!(rows[0][3], CellValue::Number(1200.0));
        assert_eq!(rows[1][4], CellValue::Number(150.0));
        assert_eq!(rows[2][3], CellValue::Number(1050.0));
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(FinancialSummary::from_movements(&[]), FinancialSummary::default());
    }

    #[test]
    fn test_maintenance_table() {
        let open = MaintenanceRequest {
            title: "Leak".into(),
            description: "Kitchen sink, left side".into(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap()),
            ..Default::default()
        };
        let closed = MaintenanceRequest {
            title: "Door".into(),
            resolved_at: Some(Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap()),
            ..Default::default()
        };
        let table = maintenance_table(&[open, closed], "Not resolved");

        // Commas are kept; each output format decides how to encode them
        assert_eq!(table.rows[0][1], CellValue::text("Kitchen sink, left side"));
        assert_eq!(table.rows[0][4], CellValue::text("February 1, 2024"));
        assert_eq!(table.rows[0][5], CellValue::text("Not resolved"));
        assert_eq!(table.rows[1][5], CellValue::text("February 10, 2024"));
    }

    #[test]
    fn test_build_requires_rental() {
        let err = ReportTables::build(&RentalReportAggregate::default(), "Not resolved").unwrap_err();
        assert!(matches!(err, ExportError::EmptyAggregate));
    }

    #[test]
    fn test_build_counts_open_requests() {
        let aggregate = RentalReportAggregate::new(Rental::default()).with_maintenance(vec![
            MaintenanceRequest::default(),
            MaintenanceRequest {
                resolved_at: Some(Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap()),
                ..Default::default()
            },
        ]);
        let tables = ReportTables::build(&aggregate, "Not resolved").unwrap();

        assert_eq!(tables.open_requests, 1);
        assert!(tables.unit.is_none());
        assert_eq!(
            tables.maintenance_summary_rows(),
            vec![
                vec![CellValue::text("Total Requests"), CellValue::Number(2.0)],
                vec![CellValue::text("Open Requests"), CellValue::Number(1.0)],
            ]
        );
    }
}
