//! The export entry point
//!
//! One call runs `Building → Serializing → Done`, or stops in `Failed`
//! with an error and no bytes. Nothing is kept between calls.

use crate::error::Result;
use crate::format::ExportFormat;
use crate::model::RentalReportAggregate;
use crate::options::ExportOptions;
use crate::serialize::{to_csv, to_json, to_xlsx, PrintRenderer};
use crate::tables::ReportTables;

/// What to export, and as what
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub aggregate: &'a RentalReportAggregate,
    pub format: ExportFormat,
    /// File name without extension
    pub base_filename: &'a str,
}

impl<'a> ExportRequest<'a> {
    /// Create a request
    pub fn new(
        aggregate: &'a RentalReportAggregate,
        format: ExportFormat,
        base_filename: &'a str,
    ) -> Self {
        Self {
            aggregate,
            format,
            base_filename,
        }
    }
}

/// A finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub bytes: Vec<u8>,
    /// `{base_filename}.{extension}`
    pub filename: String,
    pub mime_type: &'static str,
}

/// Export an aggregate in the requested format
pub fn export(request: &ExportRequest<'_>, options: &ExportOptions) -> Result<ExportResult> {
    run(request, options).map_err(|err| {
        log::warn!(
            "export of '{}' as {} failed: {}",
            request.base_filename,
            request.format,
            err
        );
        err
    })
}

/// Export with the format given by name (`json`, `csv`, `xlsx`, `html`, ...)
pub fn export_named(
    aggregate: &RentalReportAggregate,
    format: &str,
    base_filename: &str,
    options: &ExportOptions,
) -> Result<ExportResult> {
    let format = format.parse::<ExportFormat>().map_err(|err| {
        log::warn!("export of '{}' failed: {}", base_filename, err);
        err
    })?;
    export(&ExportRequest::new(aggregate, format, base_filename), options)
}

fn run(request: &ExportRequest<'_>, options: &ExportOptions) -> Result<ExportResult> {
    log::debug!(
        "export of '{}' as {}: building tables",
        request.base_filename,
        request.format
    );
    let tables = ReportTables::build(request.aggregate, &options.not_resolved_marker)?;

    log::debug!(
        "export of '{}' as {}: serializing",
        request.base_filename,
        request.format
    );
    let bytes = match request.format {
        ExportFormat::Json => to_json(&tables, options.timestamp())?,
        ExportFormat::Csv => to_csv(&tables, &options.csv)?,
        ExportFormat::Workbook => to_xlsx(&tables)?,
        ExportFormat::Print => PrintRenderer {
            title: &options.document_title,
            currency_symbol: &options.currency_symbol,
        }
        .render(&tables, options.timestamp())
        .into_bytes(),
    };

    let result = ExportResult {
        bytes,
        filename: format!("{}.{}", request.base_filename, request.format.extension()),
        mime_type: request.format.mime_type(),
    };
    log::debug!(
        "export of '{}' as {}: done, {} bytes",
        request.base_filename,
        request.format,
        result.bytes.len()
    );
    Ok(result)
}
