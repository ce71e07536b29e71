//! XLSX Workbook Writer
//! Builds a single-sheet spreadsheet package by direct ZIP/XML generation.
//! Text cells use inline strings so no sharedStrings part is needed.

use std::io::{Cursor, Write};

use polars::prelude::*;
use ::zip::write::FileOptions;
use ::zip::ZipWriter;

use super::ExportError;

/// Serialize `df` as a single-sheet xlsx package in memory.
pub fn write_workbook(df: &DataFrame) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(RELS_XML.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(WORKBOOK_XML.as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(WORKBOOK_RELS_XML.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(worksheet_xml(df)?.as_bytes())?;

    zip.start_file("docProps/core.xml", options)?;
    zip.write_all(CORE_PROPS_XML.as_bytes())?;

    zip.start_file("docProps/app.xml", options)?;
    zip.write_all(APP_PROPS_XML.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Worksheet part: header row from column names, then one row per table row.
fn worksheet_xml(df: &DataFrame) -> Result<String, ExportError> {
    let mut rows = String::new();
    rows.push_str(&header_row_xml(df));

    let columns = df.get_columns();
    for row_idx in 0..df.height() {
        let excel_row = row_idx + 2;
        rows.push_str(&format!(r#"<row r="{}">"#, excel_row));
        for (col_idx, column) in columns.iter().enumerate() {
            let value = column.as_materialized_series().get(row_idx)?;
            rows.push_str(&cell_xml(col_idx, excel_row, &value));
        }
        rows.push_str("</row>\n");
    }

    Ok(format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
{}</sheetData>
</worksheet>"#,
        rows
    ))
}

fn header_row_xml(df: &DataFrame) -> String {
    let mut row = String::from(r#"<row r="1">"#);
    for (idx, name) in df.get_column_names().iter().enumerate() {
        row.push_str(&format!(
            r#"<c r="{}1" t="inlineStr"><is><t>{}</t></is></c>"#,
            column_letters(idx),
            escape_xml(name.as_str()),
        ));
    }
    row.push_str("</row>\n");
    row
}

fn cell_xml(col_idx: usize, excel_row: usize, value: &AnyValue) -> String {
    let cell_ref = format!("{}{}", column_letters(col_idx), excel_row);
    match value {
        AnyValue::Null => format!(r#"<c r="{}"/>"#, cell_ref),
        AnyValue::Boolean(b) => {
            format!(r#"<c r="{}" t="b"><v>{}</v></c>"#, cell_ref, *b as u8)
        }
        AnyValue::Float32(v) => float_cell_xml(&cell_ref, f64::from(*v)),
        AnyValue::Float64(v) => float_cell_xml(&cell_ref, *v),
        AnyValue::Int8(_)
        | AnyValue::Int16(_)
        | AnyValue::Int32(_)
        | AnyValue::Int64(_)
        | AnyValue::UInt8(_)
        | AnyValue::UInt16(_)
        | AnyValue::UInt32(_)
        | AnyValue::UInt64(_) => format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, value),
        other => {
            let text = other.to_string();
            format!(
                r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                cell_ref,
                escape_xml(text.trim_matches('"')),
            )
        }
    }
}

/// Non-finite floats have no SpreadsheetML number form; emit an empty cell.
fn float_cell_xml(cell_ref: &str, value: f64) -> String {
    if value.is_finite() {
        format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, value)
    } else {
        format!(r#"<c r="{}"/>"#, cell_ref)
    }
}

/// Zero-based column index to spreadsheet letters (0 -> A, 26 -> AA).
fn column_letters(mut idx: usize) -> String {
    let mut letters = String::new();
    loop {
        letters.insert(0, (b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

const CORE_PROPS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:creator>TableSweep</dc:creator>
<cp:lastModifiedBy>TableSweep</cp:lastModifiedBy>
<cp:revision>1</cp:revision>
</cp:coreProperties>"#;

const APP_PROPS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
<Application>TableSweep</Application>
<ScaleCrop>false</ScaleCrop>
<LinksUpToDate>false</LinksUpToDate>
<SharedDoc>false</SharedDoc>
<HyperlinksChanged>false</HyperlinksChanged>
<AppVersion>16.0000</AppVersion>
</Properties>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters_cover_multi_letter_refs() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn escapes_markup_in_text_cells() {
        let df = df!("a&b" => ["<tag>"]).unwrap();
        let xml = worksheet_xml(&df).unwrap();
        assert!(xml.contains("a&amp;b"));
        assert!(xml.contains("&lt;tag&gt;"));
        assert!(!xml.contains("<tag>"));
    }

    #[test]
    fn nulls_become_empty_cells() {
        let df = df!("x" => [Some(1.0f64), None]).unwrap();
        let xml = worksheet_xml(&df).unwrap();
        assert!(xml.contains(r#"<c r="A2"><v>1</v></c>"#));
        assert!(xml.contains(r#"<c r="A3"/>"#));
    }
}
