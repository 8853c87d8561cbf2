use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::{Row, Table};
use crate::error::{RegressionError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read the raw CSV text behind `path`.
///
/// Failures are reported as [`RegressionError::Fetch`], which carries a hint
/// for the user.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| RegressionError::Fetch {
        path: path.to_path_buf(),
        source,
    })
}

/// Split raw CSV text into a header and rows.
///
/// Layout rules:
/// * any line ending (`\n`, `\r\n`, `\r`) separates lines
/// * lines that are blank after trimming are dropped, wherever they appear
/// * the first remaining line is the header, each cell trimmed
/// * every other line is split on `,` and zipped against the header;
///   missing trailing fields read as `""`, surplus fields are ignored
///
/// Quotes are not interpreted. A quoted field containing a comma is split
/// like any other field.
pub fn parse_csv(text: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        match &headers {
            None => headers = Some(record.iter().map(str::to_string).collect()),
            Some(names) => rows.push(zip_row(names, &record)),
        }
    }

    let headers = headers.unwrap_or_default();
    log::debug!("parsed {} columns and {} rows", headers.len(), rows.len());
    Ok(Table { headers, rows })
}

// -- helpers --

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty) && record.len() <= 1
}

fn zip_row(headers: &[String], record: &StringRecord) -> Row {
    let values = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").to_string()))
        .collect();
    Row { values }
}
