//! XLSX writer

use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use crate::error::XlsxResult;
use rental_report_core::{encode_range, CellAddress, CellValue, Workbook, Worksheet};

const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

/// One font, the two mandatory fills, one border and the single default
/// cell format every cell refers to
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
    <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
    <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

/// Package layout written for every workbook:
///
/// ```text
/// [Content_Types].xml
/// _rels/.rels
/// xl/workbook.xml
/// xl/_rels/workbook.xml.rels
/// xl/styles.xml
/// xl/worksheets/sheet{n}.xml   (one per sheet, 1-based, tab order)
/// ```
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook into an in-memory buffer
    pub fn to_bytes(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        Self::write(workbook, &mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        Self::add_part(&mut zip, "[Content_Types].xml", &Self::content_types_xml(workbook))?;
        Self::add_part(&mut zip, "_rels/.rels", ROOT_RELS_XML)?;
        Self::add_part(&mut zip, "xl/workbook.xml", &Self::workbook_xml(workbook))?;
        Self::add_part(
            &mut zip,
            "xl/_rels/workbook.xml.rels",
            &Self::workbook_rels_xml(workbook),
        )?;
        Self::add_part(&mut zip, "xl/styles.xml", STYLES_XML)?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            let path = format!("xl/worksheets/sheet{}.xml", i + 1);
            log::trace!(
                "writing {} for '{}' ({} cells)",
                path,
                sheet.name(),
                sheet.cell_count()
            );
            Self::add_part(&mut zip, path, &Self::worksheet_xml(sheet)?)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn add_part<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        path: impl Into<String>,
        xml: &str,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(path.into(), options)?;
        zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn content_types_xml(workbook: &Workbook) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );
        for n in 1..=workbook.sheet_count() {
            xml.push_str(&format!(
                "\n    <Override PartName=\"/xl/worksheets/sheet{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
                n
            ));
        }
        xml.push_str("\n</Types>");
        xml
    }

    fn workbook_xml(workbook: &Workbook) -> String {
        let sheets: String = workbook
            .worksheets()
            .enumerate()
            .map(|(i, sheet)| {
                format!(
                    "\n        <sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
                    Self::escape_xml(sheet.name()),
                    i + 1,
                    i + 1
                )
            })
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>{}
    </sheets>
</workbook>"#,
            sheets
        )
    }

    /// Sheets take rId1..rIdN in tab order, styles take rId(N+1)
    fn workbook_rels_xml(workbook: &Workbook) -> String {
        let count = workbook.sheet_count();
        let mut rels: String = (1..=count)
            .map(|n| {
                format!(
                    "\n    <Relationship Id=\"rId{}\" Type=\"{}/worksheet\" Target=\"worksheets/sheet{}.xml\"/>",
                    n, REL_NS, n
                )
            })
            .collect();
        rels.push_str(&format!(
            "\n    <Relationship Id=\"rId{}\" Type=\"{}/styles\" Target=\"styles.xml\"/>",
            count + 1,
            REL_NS
        ));

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}
</Relationships>"#,
            rels
        )
    }

    fn worksheet_xml(sheet: &Worksheet) -> XlsxResult<String> {
        // An empty sheet still needs a dimension; Excel itself reports A1
        let dimension = match sheet.used_range() {
            Some(range) => encode_range(&range)?,
            None => "A1".to_string(),
        };

        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <dimension ref="{}"/>
    <sheetData>"#,
            dimension
        );

        // Sparse rows: only rows holding a value get a <row> element
        let mut open_row: Option<u32> = None;
        for (row, col, value) in sheet.iter_cells() {
            if open_row != Some(row) {
                if open_row.is_some() {
                    xml.push_str("\n        </row>");
                }
                xml.push_str(&format!("\n        <row r=\"{}\">", row + 1));
                open_row = Some(row);
            }
            let cell_ref = CellAddress::new(row, col).to_a1_string();
            xml.push_str(&Self::cell_xml(&cell_ref, value));
        }
        if open_row.is_some() {
            xml.push_str("\n        </row>");
        }

        xml.push_str("\n    </sheetData>\n</worksheet>");
        Ok(xml)
    }

    fn cell_xml(cell_ref: &str, value: &CellValue) -> String {
        match value {
            CellValue::Number(n) if n.is_finite() => {
                format!("\n            <c r=\"{}\"><v>{}</v></c>", cell_ref, n)
            }
            // NaN and infinities have no SpreadsheetML number form
            CellValue::Number(n) => {
                log::warn!("cell {}: writing non-finite number {} as text", cell_ref, n);
                Self::inline_string(cell_ref, &n.to_string())
            }
            CellValue::Text(s) => Self::inline_string(cell_ref, s),
            CellValue::Boolean(b) => format!(
                "\n            <c r=\"{}\" t=\"b\"><v>{}</v></c>",
                cell_ref,
                if *b { 1 } else { 0 }
            ),
            CellValue::Empty => String::new(),
        }
    }

    fn inline_string(cell_ref: &str, text: &str) -> String {
        format!(
            "\n            <c r=\"{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
            cell_ref,
            Self::escape_xml(text)
        )
    }

    /// Escape text for an attribute or element body
    ///
    /// Characters XML 1.0 cannot carry (C0 controls other than tab, LF and
    /// CR, plus U+FFFE/U+FFFF) are written as `_xHHHH_`, and CR becomes
    /// `&#13;`. A literal `_xHHHH_` in the input gets its underscore escaped
    /// as `_x005F_` so the reader does not mistake it for an escape.
    fn escape_xml(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for (i, c) in s.char_indices() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&apos;"),
                '_' if Self::looks_escaped(&s[i..]) => out.push_str("_x005F_"),
                // A raw CR would be folded into LF by any XML parser
                '\r' => out.push_str("&#13;"),
                '\t' | '\n' => out.push(c),
                c if c < '\u{20}' || c == '\u{FFFE}' || c == '\u{FFFF}' => {
                    out.push_str(&format!("_x{:04X}_", c as u32));
                }
                c => out.push(c),
            }
        }
        out
    }

    fn looks_escaped(s: &str) -> bool {
        let b = s.as_bytes();
        b.len() >= 7
            && b[1] == b'x'
            && b[2..6].iter().all(u8::is_ascii_hexdigit)
            && b[6] == b'_'
    }
}
