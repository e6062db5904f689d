//! Structured JSON report
//!
//! The JSON document is the lossless reference: every field of every table
//! appears under its camelCase key, missing values as `null`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::tables::{FinancialSummary, KeyValueTable, ListTable, ReportTables};

type Record = Map<String, Value>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    rental: Record,
    unit: Option<Record>,
    financial_movements: Vec<Record>,
    financial_summary: &'a FinancialSummary,
    maintenance_requests: Vec<Record>,
    export_date: String,
}

/// Render the tables as a pretty-printed JSON document
pub fn to_json(tables: &ReportTables, exported_at: DateTime<Utc>) -> Result<Vec<u8>> {
    let report = JsonReport {
        rental: key_value_record(&tables.rental)?,
        unit: tables.unit.as_ref().map(key_value_record).transpose()?,
        financial_movements: list_records(&tables.movements)?,
        financial_summary: &tables.summary,
        maintenance_requests: list_records(&tables.maintenance)?,
        export_date: exported_at.to_rfc3339(),
    };
    Ok(serde_json::to_vec_pretty(&report)?)
}

fn key_value_record(table: &KeyValueTable) -> Result<Record> {
    table
        .fields
        .iter()
        .map(|f| -> Result<(String, Value)> {
            Ok((f.key.to_string(), serde_json::to_value(&f.value)?))
        })
        .collect()
}

fn list_records(table: &ListTable) -> Result<Vec<Record>> {
    table
        .rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .zip(row)
                .map(|(col, value)| -> Result<(String, Value)> {
                    Ok((col.key.to_string(), serde_json::to_value(value)?))
                })
                .collect::<Result<Record>>()
        })
        .collect()
}
