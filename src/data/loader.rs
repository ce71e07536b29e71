//! File Loader Module
//! Turns uploaded bytes into a Polars DataFrame based on file extension.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unsupported file type: .{0}")]
    UnsupportedFormat(String),
    #[error("Failed to parse table: {0}")]
    Parse(#[from] PolarsError),
    #[error("Failed to parse spreadsheet: {0}")]
    Excel(#[from] calamine::XlsxError),
    #[error("Workbook contains no sheets")]
    NoSheets,
}

/// Parses uploaded files into DataFrames, dispatching on extension.
pub struct FileLoader;

impl FileLoader {
    /// Parse raw bytes into a DataFrame. The format is chosen by the
    /// filename's extension, case-insensitively.
    pub fn load(bytes: Vec<u8>, file_name: &str) -> Result<DataFrame, LoadError> {
        match Self::extension(file_name).as_str() {
            "csv" => Self::load_csv(bytes),
            "xlsx" => Self::load_xlsx(bytes),
            other => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }

    fn extension(file_name: &str) -> String {
        Path::new(file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    fn load_csv(bytes: Vec<u8>) -> Result<DataFrame, LoadError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;
        Ok(df)
    }

    /// Parse the first sheet of an xlsx workbook.
    fn load_xlsx(bytes: Vec<u8>) -> Result<DataFrame, LoadError> {
        let mut workbook = Xlsx::new(Cursor::new(bytes))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(LoadError::NoSheets)?;
        let range = workbook.worksheet_range(&sheet_name)?;
        Ok(Self::range_to_frame(&range)?)
    }

    /// Convert a calamine cell range into a DataFrame. The first row is the
    /// header; a column is numeric when every non-empty cell below it is.
    fn range_to_frame(range: &Range<Data>) -> PolarsResult<DataFrame> {
        let Some(header) = range.rows().next() else {
            return Ok(DataFrame::empty());
        };

        let columns: Vec<Column> = header
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let name = match cell_to_string(cell) {
                    s if s.is_empty() => format!("column_{}", idx + 1),
                    s => s,
                };
                let cells: Vec<&Data> = range
                    .rows()
                    .skip(1)
                    .map(|row| row.get(idx).unwrap_or(&Data::Empty))
                    .collect();
                build_column(&name, &cells)
            })
            .collect();

        DataFrame::new(columns)
    }
}

fn build_column(name: &str, cells: &[&Data]) -> Column {
    let numeric = cells
        .iter()
        .all(|cell| matches!(cell, Data::Empty | Data::Float(_) | Data::Int(_)));

    if numeric {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Float(f) => Some(*f),
                Data::Int(i) => Some(*i as f64),
                _ => None,
            })
            .collect();
        Column::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Empty => None,
                other => Some(cell_to_string(other)),
            })
            .collect();
        Column::new(name.into(), values)
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_csv_bytes() {
        let bytes = b"a,b\n1,2\n3,4\n".to_vec();
        let df = FileLoader::load(bytes, "data.csv").unwrap();

        assert_eq!(df.shape(), (2, 2));
        assert_eq!(
            df.get_column_names()
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(df.column("a").unwrap().i64().unwrap().get(1), Some(3));
    }

    #[test]
    fn extension_is_case_insensitive() {
        let bytes = b"x\n1\n".to_vec();
        assert!(FileLoader::load(bytes, "DATA.CSV").is_ok());
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = FileLoader::load(vec![0, 1, 2], "x.bin").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: .bin");
    }

    #[test]
    fn rejects_missing_extension() {
        let err = FileLoader::load(b"a,b\n1,2\n".to_vec(), "data").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn corrupt_xlsx_is_a_parse_error() {
        let err = FileLoader::load(b"not a zip archive".to_vec(), "broken.xlsx").unwrap_err();
        assert!(matches!(err, LoadError::Excel(_)));
    }
}
