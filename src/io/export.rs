//! Export every query's result to CSV.
//!
//! The file has one `zipcode,rate` row per query in input order; `rate` is
//! empty for queries that were skipped.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::Rate;
use crate::error::{AppError, EXIT_IO};
use crate::report::QueryOutcome;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    zipcode: &'a str,
    rate: Option<Rate>,
}

/// Write results to a CSV file at `path`.
pub fn write_results_csv(path: &Path, outcomes: &[QueryOutcome]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, outcomes)
}

pub fn write_results<W: Write>(out: W, outcomes: &[QueryOutcome]) -> Result<(), AppError> {
    // Header written by hand so an empty batch still produces it.
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);

    writer
        .write_record(["zipcode", "rate"])
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write export CSV header: {e}")))?;

    for outcome in outcomes {
        let row = ExportRow {
            zipcode: &outcome.query.raw,
            rate: outcome.rate(),
        };
        writer
            .serialize(row)
            .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::io::ingest::Query;

    #[test]
    fn writes_blank_rate_for_skipped_queries() {
        let outcomes = vec![
            QueryOutcome {
                query: Query {
                    line: 2,
                    raw: "64148".to_string(),
                },
                result: Ok(Rate::from_cents(24520)),
            },
            QueryOutcome {
                query: Query {
                    line: 3,
                    raw: "67118".to_string(),
                },
                result: Err(LookupError::UnknownPostalCode { postal_code: 67118 }),
            },
        ];

        let mut buf = Vec::new();
        write_results(&mut buf, &outcomes).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "zipcode,rate\n64148,245.20\n67118,\n");
    }

    #[test]
    fn empty_batch_still_has_header() {
        let mut buf = Vec::new();
        write_results(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "zipcode,rate\n");
    }
}
