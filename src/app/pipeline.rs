//! Batch pipeline shared by the binary and the integration tests.
//!
//! reference CSVs -> index -> query list -> per-query resolution
//!
//! Nothing here prints; `app` decides what to show.

use rayon::prelude::*;

use crate::domain::{MetalTier, RunConfig};
use crate::error::AppError;
use crate::io::ingest::{Query, load_queries, load_rows};
use crate::lookup::{ReferenceIndex, resolve_slcsp};
use crate::report::{BatchReport, QueryOutcome};

/// Load both reference datasets and build the index.
pub fn load_index(config: &RunConfig) -> Result<ReferenceIndex, AppError> {
    let zip_rows = load_rows(&config.zips_path)?;
    let plan_rows = load_rows(&config.plans_path)?;
    Ok(ReferenceIndex::build(&zip_rows, &plan_rows)?)
}

/// Resolve every query; outcomes keep the query order.
pub fn resolve_batch(index: &ReferenceIndex, queries: &[Query], tier: MetalTier) -> Vec<QueryOutcome> {
    queries
        .par_iter()
        .map(|query| QueryOutcome {
            query: query.clone(),
            result: resolve_slcsp(index, &query.raw, tier),
        })
        .collect()
}

/// Execute the full batch: reference data is validated in full before the
/// query file is read.
pub fn run_batch(config: &RunConfig) -> Result<BatchReport, AppError> {
    let index = load_index(config)?;
    let queries = load_queries(&config.query_path)?;
    let outcomes = resolve_batch(&index, &queries, config.tier);

    Ok(BatchReport {
        index_stats: index.stats(),
        outcomes,
    })
}
