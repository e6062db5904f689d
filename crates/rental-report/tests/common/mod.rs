//! Shared fixtures

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rental_report::prelude::*;

/// Contract RC-001 with one rent payment and one repair
pub fn scenario() -> RentalReportAggregate {
    RentalReportAggregate::new(Rental {
        contract_number: "RC-001".into(),
        current_price: 1200.0,
        security_deposit: 2400.0,
        months_count: 12,
        rest_months_left: 5,
        ..Default::default()
    })
    .with_unit(Unit {
        number: "U-5".into(),
        ..Default::default()
    })
    .with_movements(vec![
        FinancialMovement {
            credit: 1200.0,
            debit: 0.0,
            description: "Rent".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5),
            ..Default::default()
        },
        FinancialMovement {
            credit: 0.0,
            debit: 150.0,
            description: "Repair".into(),
            ..Default::default()
        },
    ])
}

pub fn exported_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

pub fn options() -> ExportOptions {
    ExportOptions::default().with_exported_at(exported_at())
}
