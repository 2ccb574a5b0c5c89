//! Batch outcomes and their summaries.
//!
//! Formatting of terminal output lives in `format` so the lookup code never
//! decides how results look.

use std::collections::BTreeMap;

use crate::domain::Rate;
use crate::error::LookupError;
use crate::io::ingest::Query;
use crate::lookup::IndexStats;

pub mod format;

pub use format::*;

/// What happened to one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub query: Query,
    pub result: Result<Rate, LookupError>,
}

impl QueryOutcome {
    pub fn rate(&self) -> Option<Rate> {
        self.result.as_ref().ok().copied()
    }
}

/// All outcomes of a batch, in query-file order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub index_stats: IndexStats,
    pub outcomes: Vec<QueryOutcome>,
}

/// Counts per outcome kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub resolved: usize,
    /// Skipped queries keyed by `LookupError::kind`.
    pub skipped: BTreeMap<&'static str, usize>,
}

impl BatchReport {
    /// `(query, rate)` for every query that produced a rate.
    pub fn resolved(&self) -> impl Iterator<Item = (&Query, Rate)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|o| o.rate().map(|rate| (&o.query, rate)))
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.outcomes.len(),
            ..BatchSummary::default()
        };
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(_) => summary.resolved += 1,
                Err(err) => *summary.skipped.entry(err.kind()).or_default() += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(raw: &str, result: Result<Rate, LookupError>) -> QueryOutcome {
        QueryOutcome {
            query: Query {
                line: 2,
                raw: raw.to_string(),
            },
            result,
        }
    }

    #[test]
    fn summary_counts_each_kind() {
        let report = BatchReport {
            index_stats: IndexStats {
                postal_codes: 0,
                plan_keys: 0,
                plan_entries: 0,
            },
            outcomes: vec![
                outcome("1", Ok(Rate::from_cents(100))),
                outcome("2", Err(LookupError::UnknownPostalCode { postal_code: 2 })),
                outcome("3", Err(LookupError::UnknownPostalCode { postal_code: 3 })),
                outcome("x", Err(LookupError::InvalidPostalCode { raw: "x".to_string() })),
            ],
        };

        let summary = report.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.resolved, 1);
        assert_eq!(summary.skipped.get("unknown_postal_code"), Some(&2));
        assert_eq!(summary.skipped.get("invalid_postal_code"), Some(&1));

        let resolved: Vec<(&str, Rate)> = report.resolved().map(|(q, r)| (q.raw.as_str(), r)).collect();
        assert_eq!(resolved, [("1", Rate::from_cents(100))]);
    }
}
