//! Domain records handed to the export engine
//!
//! The records mirror the JSON the property-management API returns
//! (camelCase keys). Every field except the ones a report cannot do without
//! falls back to its default, so partial records deserialize.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A rental contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rental {
    pub contract_number: String,
    pub status: String,
    pub move_type: String,
    pub rental_source: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub current_price: f64,
    pub starting_price: f64,
    pub security_deposit: f64,
    /// Contract length in months
    pub months_count: u32,
    pub rest_months_left: u32,
    /// Number of roommates sharing the unit
    pub roommates: u32,
    /// Monthly payments rather than one fixed payment
    pub is_monthly: bool,
}

/// The unit a rental refers to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Unit {
    pub number: String,
    pub unit_type: String,
    pub status: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub description: String,
    pub processing_cost: Option<f64>,
}

/// One credit or debit booked against a rental
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialMovement {
    pub date: Option<NaiveDate>,
    pub description: String,
    /// Name of the movement type, e.g. "Rent" or "Repair"
    pub movement_type: String,
    pub credit: f64,
    pub debit: f64,
}

impl FinancialMovement {
    /// Credit minus debit
    pub fn net(&self) -> f64 {
        self.credit - self.debit
    }
}

/// A maintenance request filed for the rented unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceRequest {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub created_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    /// Name of the person who filed the request
    pub reporter: String,
}

impl MaintenanceRequest {
    /// A request is open until it has a resolution date
    pub fn is_open(&self) -> bool {
        self.resolved_at.is_none()
    }
}

/// Everything one report is built from
///
/// Owned by the caller; the engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RentalReportAggregate {
    pub rental: Option<Rental>,
    pub unit: Option<Unit>,
    pub financial_movements: Vec<FinancialMovement>,
    pub maintenance_requests: Vec<MaintenanceRequest>,
}

impl RentalReportAggregate {
    /// Create an aggregate for a rental with no related records
    pub fn new(rental: Rental) -> Self {
        Self {
            rental: Some(rental),
            ..Self::default()
        }
    }

    /// Attach the rented unit
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Attach financial movements
    pub fn with_movements(mut self, movements: Vec<FinancialMovement>) -> Self {
        self.financial_movements = movements;
        self
    }

    /// Attach maintenance requests
    pub fn with_maintenance(mut self, requests: Vec<MaintenanceRequest>) -> Self {
        self.maintenance_requests = requests;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_records_deserialize() {
        let aggregate: RentalReportAggregate = serde_json::from_str(
            r#"{
                "rental": {"contractNumber": "RC-001", "currentPrice": 1200, "startDate": "2024-01-05"},
                "unit": {"number": "U-5"},
                "financialMovements": [{"credit": 1200, "description": "Rent"}],
                "maintenanceRequests": [{"title": "Leak", "createdAt": "2024-02-01T09:30:00Z"}]
            }"#,
        )
        .unwrap();

        let rental = aggregate.rental.unwrap();
        assert_eq!(rental.contract_number, "RC-001");
        assert_eq!(rental.current_price, 1200.0);
        assert_eq!(rental.start_date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(rental.end_date, None);
        assert_eq!(aggregate.unit.unwrap().number, "U-5");
        assert_eq!(aggregate.financial_movements[0].debit, 0.0);
        assert!(aggregate.maintenance_requests[0].is_open());
    }

    #[test]
    fn test_missing_rental() {
        let aggregate: RentalReportAggregate = serde_json::from_str("{}").unwrap();
        assert!(aggregate.rental.is_none());
        assert!(aggregate.financial_movements.is_empty());
    }
}
