//! Printable HTML document
//!
//! A self-contained page: a title block, a two-column grid for each
//! key/value table and a table for each list. Sections whose source table
//! is empty are left out entirely.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use rental_report_core::CellValue;

use crate::tables::{long_date, KeyValueTable, ListTable, ReportTables, ValueKind};

const STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#222}\
h1{margin-bottom:0}\
.meta{color:#666;margin-top:.25em}\
section{margin-top:1.5em;page-break-inside:avoid}\
.grid{display:grid;grid-template-columns:max-content 1fr;gap:.25em 1.5em}\
.label{font-weight:bold}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.25em .5em;text-align:left}\
td.num{text-align:right}\
@media print{body{margin:0}}";

/// Renders report tables as HTML
#[derive(Debug, Clone)]
pub struct PrintRenderer<'a> {
    /// Document heading
    pub title: &'a str,
    /// Prefix for money amounts
    pub currency_symbol: &'a str,
}

impl PrintRenderer<'_> {
    /// Render the full document
    pub fn render(&self, tables: &ReportTables, exported_at: DateTime<Utc>) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(
            html,
            "<title>{} - {}</title>",
            escape_html(self.title),
            escape_html(&tables.contract_number)
        );
        let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", STYLE);

        let _ = writeln!(
            html,
            "<header>\n<h1>{}</h1>\n<p class=\"meta\">Contract {} &middot; Exported {}</p>\n</header>",
            escape_html(self.title),
            escape_html(&tables.contract_number),
            long_date(exported_at.date_naive())
        );

        self.grid_section(&mut html, &tables.rental);
        if let Some(unit) = &tables.unit {
            self.grid_section(&mut html, unit);
        }

        if !tables.movements.is_empty() {
            self.list_section(&mut html, &tables.movements);
            let summary = [
                ("Total Income", tables.summary.total_income),
                ("Total Expenses", tables.summary.total_expenses),
                ("Net Income", tables.summary.net_income),
            ];
            html.push_str("<div class=\"grid\">\n");
            for (label, amount) in summary {
                let _ = writeln!(
                    html,
                    "<div class=\"label\">{}</div><div>{}</div>",
                    label,
                    escape_html(&self.currency(amount))
                );
            }
            html.push_str("</div>\n</section>\n");
        }

        if !tables.maintenance.is_empty() {
            self.list_section(&mut html, &tables.maintenance);
            html.push_str("</section>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn grid_section(&self, html: &mut String, table: &KeyValueTable) {
        let _ = writeln!(
            html,
            "<section>\n<h2>{}</h2>\n<div class=\"grid\">",
            escape_html(table.title)
        );
        for field in &table.fields {
            let _ = writeln!(
                html,
                "<div class=\"label\">{}</div><div>{}</div>",
                escape_html(field.label),
                escape_html(&self.display(&field.value, field.kind))
            );
        }
        html.push_str("</div>\n</section>\n");
    }

    /// Opens a section; the caller closes it
    fn list_section(&self, html: &mut String, table: &ListTable) {
        let _ = writeln!(html, "<section>\n<h2>{}</h2>\n<table>", escape_html(table.title));
        html.push_str("<thead><tr>");
        for column in &table.columns {
            let _ = write!(html, "<th>{}</th>", escape_html(column.label));
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for row in &table.rows {
            html.push_str("<tr>");
            for (column, value) in table.columns.iter().zip(row) {
                let class = if column.kind == ValueKind::Currency {
                    " class=\"num\""
                } else {
                    ""
                };
                let _ = write!(
                    html,
                    "<td{}>{}</td>",
                    class,
                    escape_html(&self.display(value, column.kind))
                );
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");
    }

    fn display(&self, value: &CellValue, kind: ValueKind) -> String {
        match (value, kind) {
            (CellValue::Number(n), ValueKind::Currency) => self.currency(*n),
            (CellValue::Boolean(b), _) => String::from(if *b { "Yes" } else { "No" }),
            (CellValue::Empty, _) => "-".to_string(),
            (value, _) => value.to_string(),
        }
    }

    /// Fixed two decimals, symbol first, sign before the symbol
    pub fn currency(&self, amount: f64) -> String {
        // Sign comes from the rounded text so tiny negatives print as zero
        let digits = format!("{:.2}", amount.abs());
        if amount < 0.0 && digits != "0.00" {
            format!("-{}{}", self.currency_symbol, digits)
        } else {
            format!("{}{}", self.currency_symbol, digits)
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FinancialMovement, MaintenanceRequest, Rental, RentalReportAggregate};
    use chrono::TimeZone;

    fn renderer() -> PrintRenderer<'static> {
        PrintRenderer {
            title: "Rental Report",
            currency_symbol: "$",
        }
    }

    fn render(aggregate: &RentalReportAggregate) -> String {
        let tables = ReportTables::build(aggregate, "Not resolved").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        renderer().render(&tables, at)
    }

    #[test]
    fn test_currency() {
        assert_eq!(renderer().currency(1200.0), "$1200.00");
        assert_eq!(renderer().currency(0.5), "$0.50");
        assert_eq!(renderer().currency(-150.0), "-$150.00");
        assert_eq!(renderer().currency(-0.004), "$0.00");
        assert_eq!(renderer().currency(-0.0), "$0.00");
        assert_eq!(renderer().currency(-0.006), "-$0.01");
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let html = render(&RentalReportAggregate::new(Rental {
            contract_number: "RC-001".into(),
            current_price: 1200.0,
            ..Default::default()
        }));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Rental Report</h1>"));
        assert!(html.contains("Exported May 1, 2024"));
        assert!(html.contains("<h2>Rental Details</h2>"));
        assert!(html.contains("<div>$1200.00</div>"));
        assert!(!html.contains("Unit Details"));
        assert!(!html.contains("Financial Movements"));
        assert!(!html.contains("Maintenance"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_list_sections() {
        let html = render(
            &RentalReportAggregate::new(Rental::default())
                .with_movements(vec![FinancialMovement {
                    description: "Repair <boiler>".into(),
                    debit: 150.0,
                    ..Default::default()
                }])
                .with_maintenance(vec![MaintenanceRequest {
                    title: "Leak".into(),
                    ..Default::default()
                }]),
        );

        assert!(html.contains("<h2>Financial Movements</h2>"));
        assert!(html.contains("<td>Repair &lt;boiler&gt;</td>"));
        assert!(html.contains("<td class=\"num\">-$150.00</td>"));
        assert!(html.contains("<div class=\"label\">Net Income</div><div>-$150.00</div>"));
        assert!(html.contains("<h2>Maintenance Requests</h2>"));
        assert!(html.contains("<td>Not resolved</td>"));
    }
}
