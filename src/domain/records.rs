//! Raw CSV rows and their validated forms.
//!
//! A `RawRow` is a header-name → value map for one CSV record. `ZipRecord` and
//! `PlanRecord` are produced from it by `from_row`, which normalizes the values
//! or reports the first invalid field.

use std::collections::HashMap;

use crate::domain::{MetalTier, PlanKey, PlanRate, Rate, Region, StateCode};
use crate::error::ValidationError;

/// One CSV record keyed by normalized header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line in the source file (the header is line 1).
    pub line: usize,
    pub fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new(line: usize, fields: HashMap<String, String>) -> Self {
        Self { line, fields }
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<'a>(line: usize, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { line, fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn require(&self, field: &'static str) -> Result<&str, ValidationError> {
        self.get(field)
            .map(str::trim)
            .ok_or(ValidationError::MissingField { field })
    }
}

/// A validated row of the zips dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipRecord {
    pub postal_code: u32,
    pub region: Region,
    pub county_code: u32,
    pub county_name: String,
}

impl ZipRecord {
    /// Columns: `zipcode`, `state`, `county_code`, `name`, `rate_area`.
    pub fn from_row(row: &RawRow) -> Result<Self, ValidationError> {
        let postal_code = parse_non_negative("zipcode", row.require("zipcode")?)?;
        let state = parse_state(row.require("state")?)?;
        let county_code = parse_non_negative("county_code", row.require("county_code")?)?;
        let county_name = row.require("name")?.to_string();
        let rate_area = parse_non_negative("rate_area", row.require("rate_area")?)?;

        Ok(Self {
            postal_code,
            region: Region { state, rate_area },
            county_code,
            county_name,
        })
    }
}

/// A validated row of the plans dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRecord {
    pub plan_id: String,
    pub region: Region,
    pub tier: MetalTier,
    pub rate: Rate,
}

impl PlanRecord {
    /// Columns: `plan_id`, `state`, `metal_level`, `rate`, `rate_area`.
    pub fn from_row(row: &RawRow) -> Result<Self, ValidationError> {
        let plan_id = row.require("plan_id")?.to_string();
        let state = parse_state(row.require("state")?)?;

        let metal = row.require("metal_level")?;
        let tier = MetalTier::parse(metal).ok_or_else(|| ValidationError::InvalidMetalTier {
            value: metal.to_string(),
            allowed: MetalTier::allowed_values(),
        })?;

        let rate_text = row.require("rate")?;
        let rate = Rate::parse(rate_text).ok_or_else(|| ValidationError::InvalidRate {
            value: rate_text.to_string(),
        })?;

        let rate_area = parse_non_negative("rate_area", row.require("rate_area")?)?;

        Ok(Self {
            plan_id,
            region: Region { state, rate_area },
            tier,
            rate,
        })
    }

    /// Split into the index key and the bucket entry.
    pub fn into_keyed(self) -> (PlanKey, PlanRate) {
        (
            PlanKey::new(self.region, self.tier),
            PlanRate {
                plan_id: self.plan_id,
                rate: self.rate,
            },
        )
    }
}

/// Parse a query or reference postal code.
pub fn parse_postal_code(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok()
}

fn parse_state(value: &str) -> Result<StateCode, ValidationError> {
    StateCode::parse(value).ok_or_else(|| ValidationError::InvalidStateCode {
        value: value.to_string(),
    })
}

fn parse_non_negative(field: &'static str, value: &str) -> Result<u32, ValidationError> {
    value
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidNumericField {
            field,
            value: value.to_string(),
        })
}
