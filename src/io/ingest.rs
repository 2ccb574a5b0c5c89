//! CSV ingest.
//!
//! Turns the reference datasets and the query list into `RawRow`s. This module
//! knows about files, headers and CSV syntax only; field validation lives in
//! `domain::records`.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::RawRow;
use crate::error::{AppError, EXIT_IO};

/// Column the query file must provide.
pub const QUERY_COLUMN: &str = "zipcode";

/// One requested postal code, as written in the query file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub line: usize,
    /// Trimmed cell text; echoed back verbatim in result lines.
    pub raw: String,
}

/// Open and read every row of a CSV file.
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_rows(file, &path.display().to_string())
}

/// Read every row from a CSV source. `source` names it in error messages.
pub fn read_rows<R: Read>(reader: R, source: &str) -> Result<Vec<RawRow>, AppError> {
    read_table(reader, source).map(|(_, rows)| rows)
}

/// Normalized header names plus rows.
fn read_table<R: Read>(reader: R, source: &str) -> Result<(Vec<String>, Vec<RawRow>), AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to read CSV headers of '{source}': {e}")))?
        .clone();
    let names: Vec<String> = headers.iter().map(normalize_header_name).collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; lines are 1-based.
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::new(EXIT_IO, format!("CSV parse error in '{source}' line {line}: {e}")))?;
        rows.push(RawRow::new(line, zip_fields(&names, &record)));
    }

    Ok((names, rows))
}

/// Load the query list from a CSV with a `zipcode` column.
pub fn load_queries(path: &Path) -> Result<Vec<Query>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to open query CSV '{}': {e}", path.display())))?;
    read_queries(file, &path.display().to_string())
}

pub fn read_queries<R: Read>(reader: R, source: &str) -> Result<Vec<Query>, AppError> {
    let (names, rows) = read_table(reader, source)?;

    if !names.iter().any(|name| name == QUERY_COLUMN) {
        return Err(AppError::new(
            EXIT_IO,
            format!("Missing required column in '{source}': `{QUERY_COLUMN}`"),
        ));
    }

    Ok(rows
        .into_iter()
        .map(|row| Query {
            line: row.line,
            raw: row.get(QUERY_COLUMN).unwrap_or_default().to_string(),
        })
        .collect())
}

fn zip_fields(names: &[String], record: &StringRecord) -> HashMap<String, String> {
    // Short (flexible) records simply lack the trailing columns.
    names
        .iter()
        .zip(record.iter())
        .map(|(name, value)| (name.clone(), value.to_string()))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}
