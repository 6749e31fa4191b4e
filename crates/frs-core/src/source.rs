//! # Rule Source Port
//!
//! The query contract every rule backend implements. Two interchangeable
//! implementations live in `frs-store`: an in-memory fixture store and a
//! PostgreSQL store. The composer only ever sees `&dyn RuleSource`; it
//! never branches on backend identity.
//!
//! All methods are fallible with [`SourceError`]: an unreachable backend is
//! a fault to surface, never something to paper over with an empty snapshot
//! (an empty snapshot would misrepresent regulatory state).

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{RuleFacts, Species, VersionStamp, Zone, ZoneRestriction};

/// Rule Source I/O failure. The core never retries; any retry policy
/// belongs to the backend itself.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("rule source unavailable: {0}")]
    Unavailable(String),
}

/// Read-only query contract over the regulation facts.
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Resolve a species by its stable code.
    async fn species_by_code(&self, code: &str) -> Result<Option<Species>, SourceError>;

    /// Resolve a zone by its code.
    async fn zone_by_code(&self, code: &str) -> Result<Option<Zone>, SourceError>;

    /// All catalogued species codes, in code order. Re-read on every call so
    /// catalogue growth is visible immediately.
    async fn all_species_codes(&self) -> Result<Vec<String>, SourceError>;

    /// Raw rule facts for one (species, zone) pair, or `None` when no
    /// regulation is on record. `on_date` is reserved for date-scoped rule
    /// rows; current backends store rules undated.
    async fn rule_facts(
        &self,
        species_code: &str,
        zone_code: &str,
        on_date: NaiveDate,
    ) -> Result<Option<RuleFacts>, SourceError>;

    /// Zone-wide restrictions effective on `on_date` (both bounds
    /// inclusive, absent bound unbounded). Not filtered by species.
    async fn zone_restrictions(
        &self,
        zone_code: &str,
        on_date: NaiveDate,
    ) -> Result<Vec<ZoneRestriction>, SourceError>;

    /// The current regulation version. Incremented exclusively by the
    /// out-of-band data-load path; this is a pure read.
    async fn current_version(&self) -> Result<VersionStamp, SourceError>;
}
