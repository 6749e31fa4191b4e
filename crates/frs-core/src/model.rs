//! # Domain Model
//!
//! Types shared by the Rule Source backends, the composer, and the API
//! surface. Reference data ([`Species`], [`Zone`]) is immutable from this
//! crate's perspective; it is created and updated only by out-of-band data
//! loading.
//!
//! ## The recorded / not-recorded tri-state
//!
//! "No size limit recorded" is a different statement from "size limit of
//! zero" and from "species unknown". The view enums ([`SizeLimitsView`],
//! [`QuotasView`]) keep that distinction pattern-matchable: the
//! `NotRecorded` variant carries an explanatory message alongside null
//! numeric fields, while `Recorded` carries exactly the subset of values on
//! record (a missing side is `null`, never defaulted to zero).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Placeholder message when neither size bound is on record.
pub const NO_SIZE_LIMIT_MESSAGE: &str = "No size limit available";

/// Placeholder message when neither quota figure is on record.
pub const NO_QUOTA_MESSAGE: &str = "No quota restrictions";

/// A catalogued species: stable code plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Species {
    pub code: String,
    pub common_name: String,
}

/// A catalogued fishing zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Zone {
    pub code: String,
}

/// Raw size limits as recorded by a backend. Either side may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLimits {
    pub min_cm: Option<i32>,
    pub max_cm: Option<i32>,
}

/// Raw quota facts as recorded by a backend.
///
/// The season window ends are stored independently (they are separate
/// nullable columns in the relational backend); the view layer only emits a
/// window when both ends are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotas {
    pub daily_limit: Option<i32>,
    pub seasonal_limit: Option<i32>,
    pub season_window_start: Option<NaiveDate>,
    pub season_window_end: Option<NaiveDate>,
}

/// The open period during which a seasonal quota applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeasonWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// An inclusive date interval during which targeting the species in the
/// zone is prohibited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClosedRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ClosedRange {
    /// Whether `date` falls inside the range, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// A zone-wide restriction record.
///
/// `effective_from` / `effective_to` are optional (open-ended on the absent
/// side). An absent `species_codes` list means the restriction applies to
/// every species in the zone; a present list scopes it to those species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ZoneRestriction {
    pub code: String,
    pub category: String,
    pub title: String,
    pub details: String,
    pub effective_from: Option<NaiveDate>,
    pub effective_to: Option<NaiveDate>,
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_codes: Option<Vec<String>>,
}

impl ZoneRestriction {
    /// Whether the restriction applies to the given species.
    pub fn applies_to(&self, species_code: &str) -> bool {
        match &self.species_codes {
            Some(codes) => codes.iter().any(|c| c == species_code),
            None => true,
        }
    }

    /// Whether the restriction is effective on the given date.
    /// Both bounds inclusive; an absent bound is unbounded on that side.
    pub fn effective_on(&self, date: NaiveDate) -> bool {
        let from_ok = self.effective_from.map_or(true, |f| f <= date);
        let to_ok = self.effective_to.map_or(true, |t| date <= t);
        from_ok && to_ok
    }
}

/// Raw rule facts for one (species, zone) pair as returned by a backend.
///
/// An entirely absent row (no regulation on record) is represented by the
/// backend returning `None`; the composer treats that the same as a present
/// row with nothing recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFacts {
    pub size_limits: Option<SizeLimits>,
    pub quotas: Option<Quotas>,
    pub closed_seasons: Vec<ClosedRange>,
}

/// The regulation version counter, read consistently once per request.
///
/// `updated_at` is the instant the counter last changed (not the wall-clock
/// read time), so two snapshots composed at the same version are
/// byte-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VersionStamp {
    pub id: i64,
    pub updated_at: DateTime<Utc>,
}

// -- Snapshot views -----------------------------------------------------------

/// Size limits as presented to clients: either the recorded values or an
/// explanatory placeholder. Serialized untagged so the placeholder appears
/// on the wire as null fields plus a `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SizeLimitsView {
    NotRecorded {
        min_cm: Option<i32>,
        max_cm: Option<i32>,
        message: String,
    },
    Recorded {
        min_cm: Option<i32>,
        max_cm: Option<i32>,
    },
}

impl SizeLimitsView {
    /// Build the view from raw facts. Recorded only when at least one bound
    /// is on record.
    pub fn from_facts(limits: Option<&SizeLimits>) -> Self {
        match limits {
            Some(l) if l.min_cm.is_some() || l.max_cm.is_some() => Self::Recorded {
                min_cm: l.min_cm,
                max_cm: l.max_cm,
            },
            _ => Self::NotRecorded {
                min_cm: None,
                max_cm: None,
                message: NO_SIZE_LIMIT_MESSAGE.to_string(),
            },
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded { .. })
    }
}

/// Quotas as presented to clients; same tri-state convention as
/// [`SizeLimitsView`]. The season window is emitted only when both of its
/// ends are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum QuotasView {
    NotRecorded {
        daily_limit: Option<i32>,
        seasonal_limit: Option<i32>,
        message: String,
    },
    Recorded {
        daily_limit: Option<i32>,
        seasonal_limit: Option<i32>,
        season_window: Option<SeasonWindow>,
    },
}

impl QuotasView {
    pub fn from_facts(quotas: Option<&Quotas>) -> Self {
        match quotas {
            Some(q) if q.daily_limit.is_some() || q.seasonal_limit.is_some() => Self::Recorded {
                daily_limit: q.daily_limit,
                seasonal_limit: q.seasonal_limit,
                season_window: match (q.season_window_start, q.season_window_end) {
                    (Some(start), Some(end)) => Some(SeasonWindow { start, end }),
                    _ => None,
                },
            },
            _ => Self::NotRecorded {
                daily_limit: None,
                seasonal_limit: None,
                message: NO_QUOTA_MESSAGE.to_string(),
            },
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded { .. })
    }
}

/// Whether targeting the species is currently permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeasonStatus {
    Open,
    Closed,
}

impl SeasonStatus {
    /// Short human-facing label derived purely from the status.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Open => "Open season",
            Self::Closed => "Closed Season",
        }
    }
}

/// Derived season state for one (species, zone, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeasonView {
    pub status: SeasonStatus,
    pub ui_badge: String,
    pub closed_ranges: Vec<ClosedRange>,
    pub next_closed_range: Option<ClosedRange>,
}

/// Version and freshness metadata stamped on every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SnapshotMeta {
    pub version_id: i64,
    pub updated_at: DateTime<Utc>,
}

/// The composed rule result for one (species, zone, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Snapshot {
    pub species: Species,
    pub zone: Zone,
    pub size_limits: SizeLimitsView,
    pub quotas: QuotasView,
    pub season: SeasonView,
    pub zone_restrictions: Vec<ZoneRestriction>,
    pub meta: SnapshotMeta,
}

/// The zone-wide aggregate: one snapshot per catalogued species plus the
/// zone's restriction list, unfiltered by species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ZoneRules {
    pub zone_restrictions: Vec<ZoneRestriction>,
    pub list: Vec<Snapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn closed_range_contains_is_inclusive() {
        let r = ClosedRange {
            from: d("2025-09-01"),
            to: d("2025-10-15"),
        };
        assert!(r.contains(d("2025-09-01")));
        assert!(r.contains(d("2025-10-15")));
        assert!(r.contains(d("2025-09-10")));
        assert!(!r.contains(d("2025-08-31")));
        assert!(!r.contains(d("2025-10-16")));
    }

    #[test]
    fn size_limits_placeholder_when_nothing_recorded() {
        let view = SizeLimitsView::from_facts(None);
        assert!(!view.is_recorded());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["min_cm"], serde_json::Value::Null);
        assert_eq!(json["max_cm"], serde_json::Value::Null);
        assert_eq!(json["message"], NO_SIZE_LIMIT_MESSAGE);

        // A present-but-empty row is the same data state as an absent row.
        let empty = SizeLimits::default();
        assert!(!SizeLimitsView::from_facts(Some(&empty)).is_recorded());
    }

    #[test]
    fn size_limits_recorded_keeps_null_side() {
        let limits = SizeLimits {
            min_cm: Some(28),
            max_cm: None,
        };
        let view = SizeLimitsView::from_facts(Some(&limits));
        assert!(view.is_recorded());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["min_cm"], 28);
        assert_eq!(json["max_cm"], serde_json::Value::Null);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn size_limit_zero_is_recorded_not_placeholder() {
        let limits = SizeLimits {
            min_cm: Some(0),
            max_cm: None,
        };
        let view = SizeLimitsView::from_facts(Some(&limits));
        assert!(view.is_recorded());
    }

    #[test]
    fn quotas_window_requires_both_ends() {
        let q = Quotas {
            daily_limit: Some(3),
            seasonal_limit: Some(10),
            season_window_start: Some(d("2025-11-01")),
            season_window_end: None,
        };
        match QuotasView::from_facts(Some(&q)) {
            QuotasView::Recorded { season_window, .. } => assert!(season_window.is_none()),
            _ => panic!("expected recorded quotas"),
        }
    }

    #[test]
    fn quotas_placeholder_message() {
        let view = QuotasView::from_facts(None);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["message"], NO_QUOTA_MESSAGE);
        assert_eq!(json["daily_limit"], serde_json::Value::Null);
    }

    #[test]
    fn restriction_without_species_codes_applies_to_all() {
        let r = ZoneRestriction {
            code: "NO_NETTING".into(),
            category: "Restriction".into(),
            title: "No netting".into(),
            details: String::new(),
            effective_from: None,
            effective_to: None,
            references: vec![],
            species_codes: None,
        };
        assert!(r.applies_to("snapper"));
        assert!(r.applies_to("garfish"));
    }

    #[test]
    fn restriction_species_scope_filters() {
        let r = ZoneRestriction {
            code: "SNAPPER_NURSERY_PROHIBITION".into(),
            category: "Species Restriction".into(),
            title: "No targeting snapper".into(),
            details: String::new(),
            effective_from: None,
            effective_to: None,
            references: vec![],
            species_codes: Some(vec!["snapper".into()]),
        };
        assert!(r.applies_to("snapper"));
        assert!(!r.applies_to("garfish"));
    }

    #[test]
    fn restriction_effective_bounds_are_inclusive_and_open_ended() {
        let r = ZoneRestriction {
            code: "X".into(),
            category: "Restriction".into(),
            title: String::new(),
            details: String::new(),
            effective_from: Some(d("2025-09-01")),
            effective_to: Some(d("2025-10-31")),
            references: vec![],
            species_codes: None,
        };
        assert!(r.effective_on(d("2025-09-01")));
        assert!(r.effective_on(d("2025-10-31")));
        assert!(!r.effective_on(d("2025-08-31")));

        let open = ZoneRestriction {
            effective_from: Some(d("2025-01-01")),
            effective_to: None,
            ..r
        };
        assert!(open.effective_on(d("2099-12-31")));
    }

    #[test]
    fn species_codes_omitted_from_json_when_absent() {
        let r = ZoneRestriction {
            code: "X".into(),
            category: "Restriction".into(),
            title: String::new(),
            details: String::new(),
            effective_from: None,
            effective_to: None,
            references: vec![],
            species_codes: None,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("species_codes").is_none());
    }

    #[test]
    fn season_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(SeasonStatus::Closed).unwrap(),
            serde_json::json!("CLOSED")
        );
        assert_eq!(SeasonStatus::Closed.badge(), "Closed Season");
        assert_eq!(SeasonStatus::Open.badge(), "Open season");
    }
}
