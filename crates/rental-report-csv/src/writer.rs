//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, FieldPolicy, LineTerminator};
use rental_report_core::{CellValue, Worksheet};

/// One titled block of a sectioned CSV document
#[derive(Debug, Clone, Copy)]
pub struct CsvSection<'a> {
    /// Section title, rendered upper-case in the header line
    pub title: &'a str,
    /// Rows of the section
    pub sheet: &'a Worksheet,
}

impl<'a> CsvSection<'a> {
    /// Create a new section
    pub fn new(title: &'a str, sheet: &'a Worksheet) -> Self {
        Self { title, sheet }
    }
}

/// Header line introducing a section, e.g. `=== FINANCIAL MOVEMENTS ===`
pub fn section_header(title: &str) -> String {
    format!("=== {} ===", title.to_uppercase())
}

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write a worksheet to a writer
    ///
    /// Only the used range is written. A worksheet without values writes
    /// nothing at all.
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
            LineTerminator::CR => csv::Terminator::Any(b'\r'),
        };

        let quote_style = match options.field_policy {
            FieldPolicy::Quote => csv::QuoteStyle::Necessary,
            FieldPolicy::ReplaceDelimiter => csv::QuoteStyle::Never,
        };

        // Rows in a section may differ in width
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .quote_style(quote_style)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        let mut replaced = 0usize;
        for row in worksheet.rows() {
            let record: Vec<String> = row
                .iter()
                .map(|value| Self::render(value, options, &mut replaced))
                .collect();
            csv_writer.write_record(&record)?;
        }

        if replaced > 0 {
            log::warn!(
                "sheet '{}': rewrote {} field(s) to keep the delimiter out of unquoted CSV",
                worksheet.name(),
                replaced
            );
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write several worksheets as one sectioned document.
    ///
    /// Each section starts with its [`section_header`] line; sections are
    /// separated by one blank line.
    pub fn write_sections<W: Write>(
        sections: &[CsvSection<'_>],
        mut writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = options.line_terminator.as_str();

        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                writer.write_all(terminator.as_bytes())?;
            }
            writer.write_all(section_header(section.title).as_bytes())?;
            writer.write_all(terminator.as_bytes())?;
            Self::write(section.sheet, &mut writer, options)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Render a sectioned document into memory
    pub fn sections_to_bytes(
        sections: &[CsvSection<'_>],
        options: &CsvWriteOptions,
    ) -> CsvResult<Vec<u8>> {
        let mut buf = Vec::new();
        Self::write_sections(sections, &mut buf, options)?;
        Ok(buf)
    }

    fn render(value: &CellValue, options: &CsvWriteOptions, replaced: &mut usize) -> String {
        let text = value.to_string();
        match options.field_policy {
            FieldPolicy::Quote => text,
            FieldPolicy::ReplaceDelimiter => {
                let delimiter = options.delimiter as char;
                let substitute = if delimiter == ';' { ',' } else { ';' };
                if !text.contains(|c| c == delimiter || c == '\n' || c == '\r') {
                    return text;
                }
                *replaced += 1;
                text.chars()
                    .map(|c| match c {
                        c if c == delimiter => substitute,
                        '\n' | '\r' => ' ',
                        c => c,
                    })
                    .collect()
            }
        }
    }
}
