//! Second-lowest rate selection.
//!
//! Rates are compared after two-place rounding, deduplicated as a set, and the
//! second smallest distinct value is the answer. A region whose plans all
//! share one price has no second lowest rate.

use std::collections::BTreeSet;

use crate::domain::{MetalTier, Rate, parse_postal_code};
use crate::error::LookupError;
use crate::lookup::ReferenceIndex;

/// Resolve a postal code as written in the query file.
pub fn resolve_slcsp(index: &ReferenceIndex, raw_postal_code: &str, tier: MetalTier) -> Result<Rate, LookupError> {
    let postal_code = parse_postal_code(raw_postal_code).ok_or_else(|| LookupError::InvalidPostalCode {
        raw: raw_postal_code.trim().to_string(),
    })?;
    resolve_postal_code(index, postal_code, tier)
}

pub fn resolve_postal_code(index: &ReferenceIndex, postal_code: u32, tier: MetalTier) -> Result<Rate, LookupError> {
    let rates = index.rates_for(postal_code, tier)?;

    second_lowest(&rates).ok_or_else(|| LookupError::Undeterminable {
        postal_code,
        tier,
        distinct: distinct_sorted(&rates).len(),
    })
}

/// Unique rate values, ascending.
pub fn distinct_sorted(rates: &[Rate]) -> Vec<Rate> {
    rates.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Second smallest distinct rate, if there are at least two.
pub fn second_lowest(rates: &[Rate]) -> Option<Rate> {
    distinct_sorted(rates).get(1).copied()
}
