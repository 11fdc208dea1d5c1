use chrono::{NaiveDate, TimeZone};
use habitpro_types::{format_submitted_at, ContactRecord};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const CSV_HEADER: &str = "Email,Mobile,Submission Date";
pub const EXPORT_SUCCESS_MESSAGE: &str = "CSV file downloaded successfully!";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export")]
    NoData,

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A rendered CSV file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

/// Whether there is anything to export
pub fn can_export(records: Option<&[ContactRecord]>) -> bool {
    records.is_some_and(|r| !r.is_empty())
}

/// `customer-contacts-YYYY-MM-DD.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("customer-contacts-{}.csv", date.format("%Y-%m-%d"))
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Render the header plus one quoted row per record, joined by `\n`
pub fn build_export<Tz: TimeZone>(
    records: Option<&[ContactRecord]>,
    tz: &Tz,
    date: NaiveDate,
) -> Result<CsvExport, ExportError>
where
    Tz::Offset: std::fmt::Display,
{
    let records = match records {
        Some(r) if !r.is_empty() => r,
        _ => return Err(ExportError::NoData),
    };

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for record in records {
        let row = [
            quote(&record.email),
            quote(&record.mobile),
            quote(&format_submitted_at(record.timestamp, tz)),
        ];
        lines.push(row.join(","));
    }

    Ok(CsvExport {
        file_name: export_file_name(date),
        content: lines.join("\n"),
    })
}

/// Write the export into `dir`, returning the full path
pub fn write_export(export: &CsvExport, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(&export.file_name);
    fs::create_dir_all(dir)
        .and_then(|()| fs::write(&path, &export.content))
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
    info!("Exported contacts to {}", path.display());
    Ok(path)
}
