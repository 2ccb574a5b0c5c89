//! Shared domain types.
//!
//! Region and tier types are small value types so they can be composed into
//! lookup keys without allocation beyond the two-letter state code.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::domain::Rate;

/// Plan cost-sharing tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum MetalTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Catastrophic,
}

impl MetalTier {
    pub const ALL: [MetalTier; 5] = [
        MetalTier::Bronze,
        MetalTier::Silver,
        MetalTier::Gold,
        MetalTier::Platinum,
        MetalTier::Catastrophic,
    ];

    /// Canonical lowercase name, as it appears in normalized keys.
    pub fn as_str(self) -> &'static str {
        match self {
            MetalTier::Bronze => "bronze",
            MetalTier::Silver => "silver",
            MetalTier::Gold => "gold",
            MetalTier::Platinum => "platinum",
            MetalTier::Catastrophic => "catastrophic",
        }
    }

    /// Case-insensitive match against the canonical names.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(text))
    }

    /// `[bronze, silver, ...]`, for error messages.
    pub fn allowed_values() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
        format!("[{}]", names.join(", "))
    }
}

impl fmt::Display for MetalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-letter state abbreviation, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateCode(String);

impl StateCode {
    /// Trim and lowercase; the result must be exactly two characters.
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase();
        if normalized.chars().count() == 2 {
            Some(Self(normalized))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pricing region: rates are uniform within one `(state, rate_area)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Region {
    pub state: StateCode,
    pub rate_area: u32,
}

/// Key of the plan rate index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanKey {
    pub region: Region,
    pub tier: MetalTier,
}

impl PlanKey {
    pub fn new(region: Region, tier: MetalTier) -> Self {
        Self { region, tier }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.region.state, self.region.rate_area, self.tier)
    }
}

/// One plan's contribution to a `PlanKey` bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRate {
    pub plan_id: String,
    pub rate: Rate,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, environment, and defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Query CSV with a `zipcode` column.
    pub query_path: PathBuf,
    pub zips_path: PathBuf,
    pub plans_path: PathBuf,
    /// Tier whose second lowest rate is reported (silver for SLCSP).
    pub tier: MetalTier,
    /// Emit per-query diagnostics and summaries on stderr.
    pub show_diagnostics: bool,
    /// Optional `zipcode,rate` export covering every query.
    pub export_path: Option<PathBuf>,
}
