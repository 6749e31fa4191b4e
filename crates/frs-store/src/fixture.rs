//! # Fixture Rule Source
//!
//! In-memory backend holding the same dataset shape the relational store
//! serves. All reads copy out under a short `parking_lot` read lock; the
//! lock is never held across an `.await` point.
//!
//! The version counter has a single writer: [`FixtureRuleSource::load`],
//! the data-load path. Every load replaces the dataset wholesale and bumps
//! the counter, so readers observing the same version always observe the
//! same facts.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;

use frs_core::model::{
    ClosedRange, Quotas, RuleFacts, SizeLimits, Species, VersionStamp, Zone, ZoneRestriction,
};
use frs_core::source::{RuleSource, SourceError};

/// A complete fixture dataset: the unit the data-load path replaces.
#[derive(Debug, Clone, Default)]
pub struct FixtureDataset {
    /// Catalogued species, keyed by code (iteration order is code order).
    pub species: BTreeMap<String, Species>,
    /// Catalogued zone codes.
    pub zones: Vec<String>,
    /// Rule facts keyed by (species_code, zone_code).
    pub rules: BTreeMap<(String, String), RuleFacts>,
    /// Zone-wide restrictions keyed by zone code.
    pub restrictions: BTreeMap<String, Vec<ZoneRestriction>>,
}

impl FixtureDataset {
    /// The development dataset: snapper with full rules in both bay and
    /// offshore zones, garfish with partial-to-absent rules, and the two
    /// VIC-BAY restrictions (one zone-wide, one snapper-scoped).
    pub fn seed() -> Self {
        let mut species = BTreeMap::new();
        for (code, name) in [("snapper", "Snapper"), ("garfish", "Garfish")] {
            species.insert(
                code.to_string(),
                Species {
                    code: code.to_string(),
                    common_name: name.to_string(),
                },
            );
        }

        let mut rules = BTreeMap::new();
        rules.insert(
            key("snapper", "VIC-BAY"),
            RuleFacts {
                size_limits: Some(SizeLimits {
                    min_cm: Some(28),
                    max_cm: None,
                }),
                quotas: Some(Quotas {
                    daily_limit: Some(3),
                    seasonal_limit: Some(10),
                    season_window_start: date("2025-11-01"),
                    season_window_end: date("2026-03-31"),
                }),
                closed_seasons: vec![ClosedRange {
                    from: date("2025-09-01").unwrap(),
                    to: date("2025-10-15").unwrap(),
                }],
            },
        );
        rules.insert(
            key("snapper", "VIC-OFF"),
            RuleFacts {
                size_limits: Some(SizeLimits {
                    min_cm: Some(30),
                    max_cm: None,
                }),
                quotas: Some(Quotas {
                    daily_limit: Some(5),
                    seasonal_limit: Some(12),
                    season_window_start: date("2025-12-01"),
                    season_window_end: date("2026-03-15"),
                }),
                closed_seasons: vec![],
            },
        );
        rules.insert(
            key("garfish", "VIC-BAY"),
            RuleFacts {
                size_limits: None,
                quotas: Some(Quotas {
                    daily_limit: Some(20),
                    seasonal_limit: None,
                    season_window_start: None,
                    season_window_end: None,
                }),
                closed_seasons: vec![],
            },
        );
        // garfish / VIC-OFF deliberately has no rule row at all.

        let mut restrictions = BTreeMap::new();
        restrictions.insert(
            "VIC-BAY".to_string(),
            vec![
                ZoneRestriction {
                    code: "NO_NETTING".to_string(),
                    category: "Restriction".to_string(),
                    title: "No netting within marina area".to_string(),
                    details: "Cast nets and gill nets are prohibited inside the marked marina boundary.".to_string(),
                    effective_from: date("2025-01-01"),
                    effective_to: None,
                    references: vec!["https://example.org/vic-bay/marina".to_string()],
                    species_codes: None,
                },
                ZoneRestriction {
                    code: "SNAPPER_NURSERY_PROHIBITION".to_string(),
                    category: "Species Restriction".to_string(),
                    title: "No targeting snapper in nursery area".to_string(),
                    details: "Targeted fishing for snapper is prohibited within the nursery area; incidental catch must be released.".to_string(),
                    effective_from: date("2025-09-01"),
                    effective_to: date("2025-10-31"),
                    references: vec!["https://example.org/vic-bay/snapper-nursery".to_string()],
                    species_codes: Some(vec!["snapper".to_string()]),
                },
            ],
        );
        restrictions.insert(
            "VIC-OFF".to_string(),
            vec![ZoneRestriction {
                code: "OFFSHORE_REEF_NET_BAN".to_string(),
                category: "Prohibited Gear".to_string(),
                title: "Seasonal net ban around offshore reefs".to_string(),
                details: "Use of gill nets is prohibited within 500m of reef markers during summer.".to_string(),
                effective_from: date("2025-12-01"),
                effective_to: date("2026-02-28"),
                references: vec!["https://example.org/vic-off/reef-net-ban".to_string()],
                species_codes: None,
            }],
        );

        Self {
            species,
            zones: vec!["VIC-BAY".to_string(), "VIC-OFF".to_string()],
            rules,
            restrictions,
        }
    }
}

fn key(species: &str, zone: &str) -> (String, String) {
    (species.to_string(), zone.to_string())
}

fn date(s: &str) -> Option<NaiveDate> {
    Some(s.parse().expect("fixture date literal"))
}

struct Inner {
    dataset: FixtureDataset,
    version: VersionStamp,
}

/// In-memory [`RuleSource`] over a [`FixtureDataset`].
pub struct FixtureRuleSource {
    inner: RwLock<Inner>,
}

impl FixtureRuleSource {
    /// An empty catalogue at version 0.
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(Inner {
                dataset: FixtureDataset::default(),
                version: VersionStamp {
                    id: 0,
                    updated_at: Utc::now(),
                },
            }),
        }
    }

    /// The seeded development dataset. The version id matches the dataset
    /// revision the seed was taken from.
    pub fn seeded() -> Self {
        Self {
            inner: RwLock::new(Inner {
                dataset: FixtureDataset::seed(),
                version: VersionStamp {
                    id: 46,
                    updated_at: Utc::now(),
                },
            }),
        }
    }

    /// Replace the dataset and bump the version counter.
    ///
    /// This is the data-load path, the counter's only writer. Read paths
    /// observing the old version have already copied their facts out.
    pub fn load(&self, dataset: FixtureDataset) -> VersionStamp {
        let mut inner = self.inner.write();
        inner.dataset = dataset;
        inner.version = VersionStamp {
            id: inner.version.id + 1,
            updated_at: Utc::now(),
        };
        inner.version
    }
}

#[async_trait]
impl RuleSource for FixtureRuleSource {
    async fn species_by_code(&self, code: &str) -> Result<Option<Species>, SourceError> {
        Ok(self.inner.read().dataset.species.get(code).cloned())
    }

    async fn zone_by_code(&self, code: &str) -> Result<Option<Zone>, SourceError> {
        let inner = self.inner.read();
        Ok(inner
            .dataset
            .zones
            .iter()
            .find(|z| *z == code)
            .map(|code| Zone { code: code.clone() }))
    }

    async fn all_species_codes(&self) -> Result<Vec<String>, SourceError> {
        // BTreeMap keys iterate in code order, which is the contract.
        Ok(self.inner.read().dataset.species.keys().cloned().collect())
    }

    async fn rule_facts(
        &self,
        species_code: &str,
        zone_code: &str,
        _on_date: NaiveDate,
    ) -> Result<Option<RuleFacts>, SourceError> {
        Ok(self
            .inner
            .read()
            .dataset
            .rules
            .get(&key(species_code, zone_code))
            .cloned())
    }

    async fn zone_restrictions(
        &self,
        zone_code: &str,
        on_date: NaiveDate,
    ) -> Result<Vec<ZoneRestriction>, SourceError> {
        Ok(self
            .inner
            .read()
            .dataset
            .restrictions
            .get(zone_code)
            .map(|list| {
                list.iter()
                    .filter(|r| r.effective_on(on_date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn current_version(&self) -> Result<VersionStamp, SourceError> {
        Ok(self.inner.read().version)
    }
}
