//! In-memory reference index.
//!
//! Two maps, built once and read-only afterwards:
//!
//! - postal code → `ZipRecord` (last row for a code wins)
//! - `(state, rate_area, tier)` → every plan rate for that key, in input order
//!
//! No cross-checks between the datasets happen here; a plan region missing
//! from the zips (or the reverse) only shows up when a lookup misses.

use std::collections::HashMap;

use crate::domain::{MetalTier, PlanKey, PlanRate, PlanRecord, RawRow, Rate, ZipRecord};
use crate::error::{Dataset, IndexError, LookupError};

/// Row counts of a built index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub postal_codes: usize,
    pub plan_keys: usize,
    pub plan_entries: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    zips: HashMap<u32, ZipRecord>,
    plans: HashMap<PlanKey, Vec<PlanRate>>,
}

impl ReferenceIndex {
    /// Validate and index both datasets.
    ///
    /// Stops at the first invalid row; no partially built index escapes.
    pub fn build(zip_rows: &[RawRow], plan_rows: &[RawRow]) -> Result<Self, IndexError> {
        let mut index = Self::default();

        for row in zip_rows {
            let record = ZipRecord::from_row(row).map_err(|source| IndexError {
                dataset: Dataset::Zips,
                line: row.line,
                source,
            })?;
            index.zips.insert(record.postal_code, record);
        }

        for row in plan_rows {
            let record = PlanRecord::from_row(row).map_err(|source| IndexError {
                dataset: Dataset::Plans,
                line: row.line,
                source,
            })?;
            let (key, entry) = record.into_keyed();
            index.plans.entry(key).or_default().push(entry);
        }

        Ok(index)
    }

    pub fn zip(&self, postal_code: u32) -> Option<&ZipRecord> {
        self.zips.get(&postal_code)
    }

    pub fn plans(&self, key: &PlanKey) -> Option<&[PlanRate]> {
        self.plans.get(key).map(Vec::as_slice)
    }

    /// All rates offered for `tier` in the region of `postal_code`.
    ///
    /// Duplicates are kept; the returned list is never empty.
    pub fn rates_for(&self, postal_code: u32, tier: MetalTier) -> Result<Vec<Rate>, LookupError> {
        let zip = self
            .zip(postal_code)
            .ok_or(LookupError::UnknownPostalCode { postal_code })?;

        let key = PlanKey::new(zip.region.clone(), tier);
        match self.plans(&key) {
            Some(entries) if !entries.is_empty() => Ok(entries.iter().map(|p| p.rate).collect()),
            _ => Err(LookupError::NoRatesForRegion { postal_code, key }),
        }
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            postal_codes: self.zips.len(),
            plan_keys: self.plans.len(),
            plan_entries: self.plans.values().map(Vec::len).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Region, StateCode};
    use crate::error::ValidationError;

    fn zip(zipcode: &str, state: &str, rate_area: &str) -> RawRow {
        RawRow::from_pairs(
            2,
            [
                ("zipcode", zipcode),
                ("state", state),
                ("county_code", "10"),
                ("name", "some-name"),
                ("rate_area", rate_area),
            ],
        )
    }

    fn plan(id: &str, state: &str, metal: &str, rate: &str, rate_area: &str) -> RawRow {
        RawRow::from_pairs(
            2,
            [
                ("plan_id", id),
                ("state", state),
                ("metal_level", metal),
                ("rate", rate),
                ("rate_area", rate_area),
            ],
        )
    }

    fn key(state: &str, rate_area: u32, tier: MetalTier) -> PlanKey {
        PlanKey::new(
            Region {
                state: StateCode::parse(state).unwrap(),
                rate_area,
            },
            tier,
        )
    }

    #[test]
    fn indexes_zips_and_plans() {
        let index = ReferenceIndex::build(
            &[zip("12345", "NY", "1"), zip("67890", "CA", "2")],
            &[
                plan("1a", "NY", "Silver", "100.12", "1"),
                plan("2b", "CA", "Gold", "200.32", "2"),
            ],
        )
        .unwrap();

        let ny = index.zip(12345).unwrap();
        assert_eq!(ny.region.state.as_str(), "ny");
        assert_eq!(ny.county_code, 10);
        assert_eq!(index.zip(67890).unwrap().region.rate_area, 2);

        let silver = index.plans(&key("ny", 1, MetalTier::Silver)).unwrap();
        assert_eq!(
            silver,
            [PlanRate {
                plan_id: "1a".to_string(),
                rate: Rate::from_cents(10012)
            }]
        );
        assert_eq!(index.plans(&key("ca", 2, MetalTier::Gold)).unwrap().len(), 1);
        assert!(index.plans(&key("ca", 2, MetalTier::Silver)).is_none());

        assert_eq!(
            index.stats(),
            IndexStats {
                postal_codes: 2,
                plan_keys: 2,
                plan_entries: 2
            }
        );
    }

    #[test]
    fn later_zip_rows_overwrite_earlier_ones() {
        let index = ReferenceIndex::build(&[zip("12345", "NY", "1"), zip("12345", "NJ", "7")], &[]).unwrap();
        let rec = index.zip(12345).unwrap();
        assert_eq!(rec.region.state.as_str(), "nj");
        assert_eq!(rec.region.rate_area, 7);
        assert_eq!(index.stats().postal_codes, 1);
    }

    #[test]
    fn plans_accumulate_in_input_order_across_state_case() {
        let index = ReferenceIndex::build(
            &[],
            &[
                plan("a", "NY", "silver", "300.00", "1"),
                plan("b", "ny", "SILVER", "100.00", "1"),
                plan("c", "Ny", "Silver", "300.00", "1"),
            ],
        )
        .unwrap();

        let ids: Vec<&str> = index
            .plans(&key("ny", 1, MetalTier::Silver))
            .unwrap()
            .iter()
            .map(|p| p.plan_id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(index.stats().plan_keys, 1);
    }

    #[test]
    fn first_invalid_row_aborts_the_build() {
        let mut bad = zip("12345", "NYC", "1");
        bad.line = 5;
        let err = ReferenceIndex::build(&[zip("11111", "NY", "1"), bad], &[]).unwrap_err();
        assert_eq!(err.dataset, Dataset::Zips);
        assert_eq!(err.line, 5);
        assert_eq!(
            err.source,
            ValidationError::InvalidStateCode {
                value: "NYC".to_string()
            }
        );

        let err = ReferenceIndex::build(
            &[zip("11111", "NY", "1")],
            &[plan("1a", "NY", "Silver", "1.00", "1"), plan("1b", "NY", "Iron", "12.34", "1")],
        )
        .unwrap_err();
        assert_eq!(err.dataset, Dataset::Plans);
        assert!(matches!(err.source, ValidationError::InvalidMetalTier { .. }));
    }

    #[test]
    fn rates_for_reports_why_nothing_matched() {
        let index = ReferenceIndex::build(
            &[zip("12345", "NY", "1"), zip("22222", "NY", "9")],
            &[
                plan("1", "NY", "Silver", "100.12", "1"),
                plan("2", "NY", "Silver", "234.31", "1"),
                plan("3", "NY", "Silver", "65.389", "1"),
            ],
        )
        .unwrap();

        let rates = index.rates_for(12345, MetalTier::Silver).unwrap();
        let shown: Vec<String> = rates.iter().map(Rate::to_string).collect();
        assert_eq!(shown, ["100.12", "234.31", "65.39"]);

        assert_eq!(
            index.rates_for(99999, MetalTier::Silver),
            Err(LookupError::UnknownPostalCode { postal_code: 99999 })
        );
        assert_eq!(
            index.rates_for(22222, MetalTier::Silver),
            Err(LookupError::NoRatesForRegion {
                postal_code: 22222,
                key: key("ny", 9, MetalTier::Silver),
            })
        );
        assert!(matches!(
            index.rates_for(12345, MetalTier::Gold),
            Err(LookupError::NoRatesForRegion { .. })
        ));
    }

    #[test]
    fn index_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<ReferenceIndex>();
    }
}
