//! Terminal output formatting.

use crate::domain::{MetalTier, Rate};
use crate::io::ingest::Query;
use crate::lookup::IndexStats;
use crate::report::BatchSummary;

/// `<zipcode>, <rate>` with the postal code echoed as written.
pub fn format_result_line(query: &Query, rate: Rate) -> String {
    format!("{}, {}", query.raw, rate)
}

/// One-line description of the loaded reference data.
pub fn format_index_stats(stats: &IndexStats) -> String {
    format!(
        "Loaded {} zipcode(s), {} plan(s) across {} region/metal key(s)",
        stats.postal_codes, stats.plan_entries, stats.plan_keys
    )
}

/// One-line batch summary, e.g. `Resolved 40/51 silver: unknown_postal_code=3, undeterminable=8`.
pub fn format_summary(summary: &BatchSummary, tier: MetalTier) -> String {
    let mut out = format!("Resolved {}/{} {tier}", summary.resolved, summary.total);
    if !summary.skipped.is_empty() {
        let parts: Vec<String> = summary
            .skipped
            .iter()
            .map(|(kind, n)| format!("{kind}={n}"))
            .collect();
        out.push_str(": ");
        out.push_str(&parts.join(", "));
    }
    out
}
