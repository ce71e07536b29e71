//! Export Module
//! Serializes a DataFrame to downloadable CSV or XLSX bytes.

mod xlsx;

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize table: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to build workbook: {0}")]
    Zip(#[from] ::zip::result::ZipError),
    #[error("Failed to write workbook: {0}")]
    Io(#[from] std::io::Error),
}

/// Export target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// Serialized table ready for the download handoff. Write-once, read-once.
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: &'static str,
}

/// Serializes tables for download.
pub struct Exporter;

impl Exporter {
    /// Serialize `df` to the target format. The artifact filename is the
    /// source filename with its extension replaced.
    pub fn export(
        df: &DataFrame,
        format: ExportFormat,
        source_name: &str,
    ) -> Result<ExportArtifact, ExportError> {
        let bytes = match format {
            ExportFormat::Csv => Self::to_csv_bytes(df)?,
            ExportFormat::Excel => xlsx::write_workbook(df)?,
        };

        Ok(ExportArtifact {
            bytes,
            file_name: derive_file_name(source_name, format.extension()),
            mime: format.mime(),
        })
    }

    /// CSV serialization with a header row and no index column. A frame with
    /// zero columns exports as empty bytes rather than a writer error.
    fn to_csv_bytes(df: &DataFrame) -> Result<Vec<u8>, ExportError> {
        if df.width() == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = Vec::new();
        let mut frame = df.clone();
        CsvWriter::new(&mut buffer)
            .include_header(true)
            .finish(&mut frame)?;
        Ok(buffer)
    }
}

/// Replace the source filename's extension with `ext`.
fn derive_file_name(source_name: &str, ext: &str) -> String {
    match source_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{stem}.{ext}"),
        _ => format!("{source_name}.{ext}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FileLoader;

    fn sample() -> DataFrame {
        df!(
            "id" => [1i64, 2, 3],
            "name" => ["ada", "grace", "edsger"],
            "score" => [0.5f64, 1.5, 2.5],
        )
        .unwrap()
    }

    #[test]
    fn csv_round_trips_through_the_loader() {
        let df = sample();
        let artifact = Exporter::export(&df, ExportFormat::Csv, "people.csv").unwrap();

        assert_eq!(artifact.file_name, "people.csv");
        assert_eq!(artifact.mime, "text/csv");

        let reloaded = FileLoader::load(artifact.bytes, &artifact.file_name).unwrap();
        assert!(df.equals(&reloaded));
    }

    #[test]
    fn csv_header_row_comes_first() {
        let artifact = Exporter::export(&sample(), ExportFormat::Csv, "people.csv").unwrap();
        let text = String::from_utf8(artifact.bytes).unwrap();
        assert!(text.starts_with("id,name,score\n"));
    }

    #[test]
    fn xlsx_round_trips_through_the_loader() {
        let df = df!(
            "score" => [Some(0.5f64), None, Some(2.5)],
            "name" => [Some("ada"), Some("grace"), None],
        )
        .unwrap();
        let artifact = Exporter::export(&df, ExportFormat::Excel, "people.csv").unwrap();

        assert_eq!(artifact.file_name, "people.xlsx");
        assert_eq!(
            artifact.mime,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );

        let reloaded = FileLoader::load(artifact.bytes, &artifact.file_name).unwrap();
        assert!(df.equals_missing(&reloaded));
    }

    #[test]
    fn empty_frame_exports_without_error() {
        let df = DataFrame::empty();

        let csv = Exporter::export(&df, ExportFormat::Csv, "empty.csv").unwrap();
        assert!(csv.bytes.is_empty());

        let xlsx = Exporter::export(&df, ExportFormat::Excel, "empty.csv").unwrap();
        assert!(!xlsx.bytes.is_empty());
    }

    #[test]
    fn derives_output_file_names() {
        assert_eq!(derive_file_name("data.csv", "xlsx"), "data.xlsx");
        assert_eq!(derive_file_name("archive.2024.xlsx", "csv"), "archive.2024.csv");
        assert_eq!(derive_file_name("data", "csv"), "data.csv");
        assert_eq!(derive_file_name(".hidden", "csv"), ".hidden.csv");
    }
}
