//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use rental_report_core::{CellValue, Worksheet};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a sectioned CSV file
    pub fn read_sections_file<P: AsRef<Path>>(
        path: P,
        options: &CsvReadOptions,
    ) -> CsvResult<Vec<Worksheet>> {
        let file = File::open(path)?;
        Self::read_sections(file, options)
    }

    /// Read a sectioned CSV document into one worksheet per section.
    ///
    /// Each worksheet is named after the title in its `=== TITLE ===` line.
    /// Blank lines between sections are ignored. Data before the first header
    /// is a [`CsvError::Section`] error.
    pub fn read_sections<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Vec<Worksheet>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut sheets = Vec::new();
        let mut current: Option<(String, Vec<Vec<CellValue>>)> = None;

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result?;

            if record.len() == 1 {
                if let Some(title) = Self::section_title(&record[0]) {
                    if let Some((name, rows)) = current.take() {
                        sheets.push(Worksheet::from_rows(name, rows)?);
                    }
                    current = Some((title.to_string(), Vec::new()));
                    continue;
                }
                if record[0].is_empty() {
                    continue;
                }
            }

            let Some((_, rows)) = current.as_mut() else {
                return Err(CsvError::Section {
                    record: row_idx,
                    message: "data before the first section header".into(),
                });
            };

            rows.push(
                record
                    .iter()
                    .map(|field| {
                        if options.auto_detect_types {
                            Self::detect_type(field)
                        } else if field.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::text(field)
                        }
                    })
                    .collect(),
            );
        }

        if let Some((name, rows)) = current {
            sheets.push(Worksheet::from_rows(name, rows)?);
        }

        log::debug!("read {} CSV section(s)", sheets.len());
        Ok(sheets)
    }

    fn section_title(field: &str) -> Option<&str> {
        field
            .strip_prefix("=== ")
            .and_then(|rest| rest.strip_suffix(" ==="))
            .filter(|title| !title.is_empty())
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        // Try boolean
        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        // Try number; "inf"/"NaN" stay text
        if trimmed.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(n) = trimmed.parse::<f64>() {
                return CellValue::Number(n);
            }
        }

        // Default to text
        CellValue::text(field)
    }
}
