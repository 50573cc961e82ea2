use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::domain::{SnapshotRow, format_fixed2};

use super::pdf::to_pdf_bytes;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// The two report formats and the file each one is saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "calculator-report.csv",
            ReportFormat::Pdf => "calculator-report.pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv;charset=utf-8",
            ReportFormat::Pdf => "application/pdf",
        }
    }

    /// Render the report in this format.
    pub fn render(&self, rows: &[SnapshotRow], total: f64) -> Result<Vec<u8>, ExportError> {
        match self {
            ReportFormat::Csv => Ok(to_csv_text(rows, total)?.into_bytes()),
            ReportFormat::Pdf => to_pdf_bytes(rows, total),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" | "excel" => Ok(ReportFormat::Csv),
            "pdf" => Ok(ReportFormat::Pdf),
            _ => Err(format!("unknown report format: {}", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Write the CSV report: a header, one row per entry, then the total.
/// Returns the number of entry rows written.
pub fn write_csv<W: Write>(
    rows: &[SnapshotRow],
    total: f64,
    writer: W,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(["Order", "Number"])?;

    let mut count = 0;
    for row in rows {
        csv_writer.write_record([row.display_index.to_string(), format_fixed2(row.value)])?;
        count += 1;
    }

    csv_writer.write_record(["Total".to_string(), format_fixed2(total)])?;
    csv_writer.flush()?;
    Ok(count)
}

/// Render the CSV report into a string.
pub fn to_csv_text(rows: &[SnapshotRow], total: f64) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(rows, total, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Save a rendered report under its fixed file name inside `dir`.
pub fn save_report(
    dir: &Path,
    format: ReportFormat,
    bytes: &[u8],
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format.file_name());
    fs::write(&path, bytes)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        content_type = format.mime_type(),
        "report saved"
    );
    Ok(path)
}
