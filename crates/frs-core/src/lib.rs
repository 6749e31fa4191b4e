//! # frs-core — Regulation Snapshot Core
//!
//! Composes independently-versioned fishing-rule facts (size limits, catch
//! quotas, closed seasons, zone-wide restrictions) into one canonical
//! snapshot per (species, zone, date), and derives the weak-validator cache
//! tags that let clients revalidate those snapshots cheaply.
//!
//! ## Modules
//!
//! - [`model`] — domain types shared by every backend and the API surface.
//! - [`source`] — the [`source::RuleSource`] port both backends implement.
//! - [`season`] — closed-season evaluation over inclusive date ranges.
//! - [`compose`] — the snapshot composer and zone aggregator.
//! - [`cache`] — conditional-cache tag derivation and comparison.
//!
//! ## Design Principle
//!
//! Everything in this crate is a pure read over externally-owned facts. The
//! only shared state in the system is the regulation version counter, and
//! this crate never writes it: composition reads one [`model::VersionStamp`]
//! per call and stamps every snapshot produced in that call with it.

pub mod cache;
pub mod compose;
pub mod model;
pub mod season;
pub mod source;

pub use compose::{aggregate_zone, aggregate_zone_at, compose, compose_at};
pub use model::{
    ClosedRange, Quotas, QuotasView, RuleFacts, SeasonStatus, SeasonView, SeasonWindow,
    SizeLimits, SizeLimitsView, Snapshot, SnapshotMeta, Species, VersionStamp, Zone,
    ZoneRestriction, ZoneRules,
};
pub use source::{RuleSource, SourceError};
