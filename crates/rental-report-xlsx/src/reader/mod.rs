//! XLSX reader
//!
//! Reads sheet names and cell values back out of a package. Styles, formulas
//! and everything else in the package are ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use zip::ZipArchive;

use crate::error::{XlsxError, XlsxResult};
use rental_report_core::{CellAddress, CellValue, Workbook, Worksheet};

const WORKSHEET_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        // Shared strings are optional; this crate's writer never emits them
        let shared_strings = match read_part(&mut archive, "xl/sharedStrings.xml")? {
            Some(xml) => parse_shared_strings(&xml)?,
            None => Vec::new(),
        };
        let sheets = parse_sheet_list(&require_part(&mut archive, "xl/workbook.xml")?)?;
        let targets =
            parse_worksheet_targets(&require_part(&mut archive, "xl/_rels/workbook.xml.rels")?)?;

        let mut workbook = Workbook::new();
        for (name, r_id) in sheets {
            let path = targets
                .get(&r_id)
                .ok_or_else(|| XlsxError::MissingPart(format!("relationship {}", r_id)))?;
            let xml = require_part(&mut archive, path)?;
            let cells = parse_sheet_data(&xml, &shared_strings)?;
            log::trace!("read {} cells from {} ('{}')", cells.len(), path, name);
            workbook.add_worksheet(Worksheet::from_cells(name, cells)?)?;
        }

        Ok(workbook)
    }
}

/// Load a whole package part, `None` when the part does not exist
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> XlsxResult<Option<Vec<u8>>> {
    let mut file = match archive.by_name(path) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(Some(buf))
}

fn require_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> XlsxResult<Vec<u8>> {
    read_part(archive, path)?.ok_or_else(|| XlsxError::MissingPart(path.to_string()))
}

/// Text events are left untrimmed: `<t xml:space="preserve">` content keeps
/// its spaces, and the parsers only look at text inside value elements
fn xml_reader(xml: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);
    reader
}

/// Undo the `_xHHHH_` escapes SpreadsheetML uses for characters XML 1.0
/// cannot carry
fn decode_xstring(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let escaped = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);
        match escaped {
            Some(c) => {
                out.push(c);
                rest = &candidate[7..];
            }
            None => {
                out.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Unescaped value of one attribute
fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.try_get_attribute(key)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// `<si>` entries of `xl/sharedStrings.xml`; rich-text runs are concatenated
fn parse_shared_strings(xml: &[u8]) -> XlsxResult<Vec<String>> {
    let mut reader = xml_reader(xml);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"si" => current = Some(String::new()),
            Event::Start(e) if e.name().as_ref() == b"t" => in_text = current.is_some(),
            Event::End(e) if e.name().as_ref() == b"t" => in_text = false,
            Event::End(e) if e.name().as_ref() == b"si" => {
                strings.extend(current.take().map(|s| decode_xstring(&s)));
            }
            Event::Empty(e) if e.name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(t) if in_text => {
                if let Some(s) = current.as_mut() {
                    s.push_str(&t.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// `(name, r:id)` of every `<sheet>` in `xl/workbook.xml`, in tab order
fn parse_sheet_list(xml: &[u8]) -> XlsxResult<Vec<(String, String)>> {
    let mut reader = xml_reader(xml);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"sheet" => {
                match (attr(&e, b"name"), attr(&e, b"r:id")) {
                    (Some(name), Some(r_id)) => sheets.push((decode_xstring(&name), r_id)),
                    _ => {
                        return Err(XlsxError::InvalidFormat(
                            "<sheet> without name or r:id".into(),
                        ))
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Worksheet relationship ids mapped to part paths inside the package
fn parse_worksheet_targets(xml: &[u8]) -> XlsxResult<HashMap<String, String>> {
    let mut reader = xml_reader(xml);
    let mut buf = Vec::new();
    let mut targets = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"Relationship" => {
                let is_worksheet = attr(&e, b"Type").as_deref() == Some(WORKSHEET_REL_TYPE);
                if let (true, Some(id), Some(target)) =
                    (is_worksheet, attr(&e, b"Id"), attr(&e, b"Target"))
                {
                    // Targets are relative to xl/ unless absolute
                    let path = match target.strip_prefix('/') {
                        Some(absolute) => absolute.to_string(),
                        None => format!("xl/{}", target),
                    };
                    targets.insert(id, path);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

/// Cell being assembled while walking `<c>` and its children
#[derive(Default)]
struct PendingCell {
    reference: Option<String>,
    cell_type: Option<String>,
    raw: Option<String>,
}

/// Cells of one worksheet part, in document order
fn parse_sheet_data(xml: &[u8], shared_strings: &[String]) -> XlsxResult<Vec<(CellAddress, CellValue)>> {
    let mut reader = xml_reader(xml);
    let mut buf = Vec::new();
    let mut cells = Vec::new();
    let mut pending: Option<PendingCell> = None;
    let mut in_value = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"c" => {
                pending = Some(PendingCell {
                    reference: attr(&e, b"r"),
                    cell_type: attr(&e, b"t"),
                    raw: None,
                });
            }
            Event::Empty(e) if e.name().as_ref() == b"c" => {
                // Styled blank; still validate the reference
                let reference = attr(&e, b"r");
                decode_cell(
                    PendingCell {
                        reference,
                        ..Default::default()
                    },
                    shared_strings,
                )?;
            }
            Event::Start(e) if matches!(e.name().as_ref(), b"v" | b"t") => {
                in_value = pending.is_some();
            }
            Event::End(e) if matches!(e.name().as_ref(), b"v" | b"t") => in_value = false,
            Event::End(e) if e.name().as_ref() == b"c" => {
                if let Some(cell) = pending.take() {
                    cells.extend(decode_cell(cell, shared_strings)?);
                }
            }
            Event::Text(t) if in_value => {
                if let Some(cell) = pending.as_mut() {
                    cell.raw
                        .get_or_insert_with(String::new)
                        .push_str(&t.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(cells)
}

/// Turn a finished `<c>` into an addressed value; `None` for cells without a value
fn decode_cell(
    cell: PendingCell,
    shared_strings: &[String],
) -> XlsxResult<Option<(CellAddress, CellValue)>> {
    let reference = cell
        .reference
        .ok_or_else(|| XlsxError::InvalidFormat("cell without r attribute".into()))?;
    let addr = CellAddress::parse(&reference)?;

    let Some(raw) = cell.raw else {
        return Ok(None);
    };

    let value = match cell.cell_type.as_deref() {
        Some("s") => {
            let text = raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|index| shared_strings.get(index))
                .ok_or_else(|| {
                    XlsxError::InvalidFormat(format!(
                        "bad shared string index '{}' in {}",
                        raw, reference
                    ))
                })?;
            CellValue::text(text.as_str())
        }
        Some("b") => CellValue::Boolean(raw.trim() == "1"),
        Some("inlineStr") | Some("str") => CellValue::Text(decode_xstring(&raw)),
        Some("e") => CellValue::Text(raw),
        _ => raw
            .trim()
            .parse::<f64>()
            .map(CellValue::Number)
            .map_err(|_| {
                XlsxError::InvalidFormat(format!("bad number '{}' in {}", raw, reference))
            })?,
    };

    Ok(Some((addr, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(cell_type: Option<&str>, raw: &str) -> CellValue {
        let pending = PendingCell {
            reference: Some("B2".into()),
            cell_type: cell_type.map(String::from),
            raw: Some(raw.into()),
        };
        decode_cell(pending, &["Shared".to_string()])
            .unwrap()
            .unwrap()
            .1
    }

    #[test]
    fn test_decode_cell_types() {
        assert_eq!(cell(None, "12.5"), CellValue::Number(12.5));
        assert_eq!(cell(Some("n"), "3"), CellValue::Number(3.0));
        assert_eq!(cell(Some("b"), "1"), CellValue::Boolean(true));
        assert_eq!(cell(Some("s"), "0"), CellValue::text("Shared"));
        assert_eq!(cell(Some("inlineStr"), "Rent"), CellValue::text("Rent"));
    }

    #[test]
    fn test_decode_cell_errors() {
        let missing_ref = PendingCell {
            raw: Some("1".into()),
            ..Default::default()
        };
        assert!(decode_cell(missing_ref, &[]).is_err());

        let bad_index = PendingCell {
            reference: Some("A1".into()),
            cell_type: Some("s".into()),
            raw: Some("4".into()),
        };
        assert!(decode_cell(bad_index, &[]).is_err());

        let no_value = PendingCell {
            reference: Some("A1".into()),
            ..Default::default()
        };
        assert!(decode_cell(no_value, &[]).unwrap().is_none());
    }

    #[test]
    fn test_parse_shared_strings() {
        let xml = br#"<sst><si><t>Rent</t></si><si><r><t>Re</t></r><r><t>pair</t></r></si><si/></sst>"#;
        assert_eq!(
            parse_shared_strings(xml).unwrap(),
            vec!["Rent".to_string(), "Repair".to_string(), String::new()]
        );
    }

    #[test]
    fn test_decode_xstring() {
        assert_eq!(decode_xstring("a_x0001_b"), "a\u{1}b");
        assert_eq!(decode_xstring("_x005F_x0041_"), "_x0041_");
        assert_eq!(decode_xstring("snake_x_case_x12"), "snake_x_case_x12");
        assert_eq!(decode_xstring("plain"), "plain");
    }

    #[test]
    fn test_inline_text_keeps_surrounding_spaces() {
        let xml = br#"<worksheet><sheetData>
            <row r="1">
                <c r="A1" t="inlineStr"><is><t xml:space="preserve">  Rent  </t></is></c>
                <c r="B1" t="inlineStr"><is><t xml:space="preserve">   </t></is></c>
                <c r="C1"><v> 7 </v></c>
            </row>
        </sheetData></worksheet>"#;

        let cells = parse_sheet_data(xml, &[]).unwrap();
        assert_eq!(
            cells,
            vec![
                (CellAddress::new(0, 0), CellValue::text("  Rent  ")),
                (CellAddress::new(0, 1), CellValue::text("   ")),
                (CellAddress::new(0, 2), CellValue::Number(7.0)),
            ]
        );
    }

    #[test]
    fn test_parse_sheet_data() {
        let xml = br#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="inlineStr"><is><t>Total</t></is></c><c r="B1"><v>1050</v></c></row>
            <row r="3"><c r="C3" s="1"/></row>
        </sheetData></worksheet>"#;

        let cells = parse_sheet_data(xml, &[]).unwrap();
        assert_eq!(
            cells,
            vec![
                (CellAddress::new(0, 0), CellValue::text("Total")),
                (CellAddress::new(0, 1), CellValue::Number(1050.0)),
            ]
        );
    }
}
