//! # Snapshot Composer & Zone Aggregator
//!
//! Merges the raw facts for one (species, zone, date) into a canonical
//! [`Snapshot`], and fans that composition out over every catalogued
//! species for a zone-wide view.
//!
//! ## Version consistency
//!
//! The public entry points read the regulation version exactly once and
//! stamp everything produced in that call with it. Callers that already
//! hold a consistently-read [`VersionStamp`] (the conditional-cache path
//! reads it before deciding whether to compose at all) use the `*_at`
//! variants so the response body carries the same version the tag was
//! derived from.

use chrono::{NaiveDate, Utc};

use crate::model::{
    QuotasView, SizeLimitsView, Snapshot, SnapshotMeta, VersionStamp, ZoneRules,
};
use crate::season;
use crate::source::{RuleSource, SourceError};

/// Compose the snapshot for one (species, zone, date).
///
/// Returns `Ok(None)` when the species or zone code does not resolve, a
/// normal "no such pair" outcome, not a fault. A pair that resolves but has
/// no rule row still composes, with placeholder size/quota views and an
/// empty closed-range list.
pub async fn compose(
    source: &dyn RuleSource,
    species_code: &str,
    zone_code: &str,
    on_date: Option<NaiveDate>,
) -> Result<Option<Snapshot>, SourceError> {
    let stamp = source.current_version().await?;
    compose_at(source, species_code, zone_code, on_date, &stamp).await
}

/// [`compose`] with a caller-supplied version stamp.
pub async fn compose_at(
    source: &dyn RuleSource,
    species_code: &str,
    zone_code: &str,
    on_date: Option<NaiveDate>,
    stamp: &VersionStamp,
) -> Result<Option<Snapshot>, SourceError> {
    compose_inner(
        source,
        species_code,
        zone_code,
        resolve_date(on_date),
        stamp,
        true,
    )
    .await
}

/// Compose the zone-wide view: one snapshot per catalogued species (in
/// species-code order, including species with no rule row for the zone)
/// plus the zone's restriction list, unfiltered by species.
///
/// Returns `Ok(None)` when the zone code does not resolve.
pub async fn aggregate_zone(
    source: &dyn RuleSource,
    zone_code: &str,
    on_date: Option<NaiveDate>,
) -> Result<Option<ZoneRules>, SourceError> {
    let stamp = source.current_version().await?;
    aggregate_zone_at(source, zone_code, on_date, &stamp).await
}

/// [`aggregate_zone`] with a caller-supplied version stamp.
pub async fn aggregate_zone_at(
    source: &dyn RuleSource,
    zone_code: &str,
    on_date: Option<NaiveDate>,
    stamp: &VersionStamp,
) -> Result<Option<ZoneRules>, SourceError> {
    let Some(zone) = source.zone_by_code(zone_code).await? else {
        return Ok(None);
    };
    let on = resolve_date(on_date);

    // The catalogue is re-read per call; the aggregator holds no species
    // cache, so catalogue changes between calls are always visible.
    let mut list = Vec::new();
    for code in source.all_species_codes().await? {
        if let Some(snapshot) =
            compose_inner(source, &code, &zone.code, on, stamp, false).await?
        {
            list.push(snapshot);
        }
    }

    let zone_restrictions = source.zone_restrictions(&zone.code, on).await?;
    Ok(Some(ZoneRules {
        zone_restrictions,
        list,
    }))
}

/// Default the query date to the current UTC calendar date.
fn resolve_date(on_date: Option<NaiveDate>) -> NaiveDate {
    on_date.unwrap_or_else(|| Utc::now().date_naive())
}

async fn compose_inner(
    source: &dyn RuleSource,
    species_code: &str,
    zone_code: &str,
    on_date: NaiveDate,
    stamp: &VersionStamp,
    filter_restrictions_by_species: bool,
) -> Result<Option<Snapshot>, SourceError> {
    let Some(species) = source.species_by_code(species_code).await? else {
        return Ok(None);
    };
    let Some(zone) = source.zone_by_code(zone_code).await? else {
        return Ok(None);
    };

    let facts = source
        .rule_facts(&species.code, &zone.code, on_date)
        .await?
        .unwrap_or_default();

    let mut zone_restrictions = source.zone_restrictions(&zone.code, on_date).await?;
    if filter_restrictions_by_species {
        zone_restrictions.retain(|r| r.applies_to(&species.code));
    }

    Ok(Some(Snapshot {
        species,
        zone,
        size_limits: SizeLimitsView::from_facts(facts.size_limits.as_ref()),
        quotas: QuotasView::from_facts(facts.quotas.as_ref()),
        season: season::evaluate(&facts.closed_seasons, on_date),
        zone_restrictions,
        meta: SnapshotMeta {
            version_id: stamp.id,
            updated_at: stamp.updated_at,
        },
    }))
}
