//! # Closed-Season Evaluation
//!
//! Evaluates a query date against the closed ranges recorded for a
//! (species, zone) pair. Ranges arrive in arbitrary source order and may
//! overlap; a date covered by any range counts as closed.
//!
//! The "next upcoming" range is selected by the earliest `from` strictly
//! after the query date. Candidates are ordered with a stable sort, so two
//! ranges starting on the same day tie-break by source order.

use chrono::NaiveDate;

use crate::model::{ClosedRange, SeasonStatus, SeasonView};

/// Derive the season view for `on_date` from the recorded closed ranges.
pub fn evaluate(ranges: &[ClosedRange], on_date: NaiveDate) -> SeasonView {
    let status = if ranges.iter().any(|r| r.contains(on_date)) {
        SeasonStatus::Closed
    } else {
        SeasonStatus::Open
    };

    let mut upcoming: Vec<ClosedRange> = ranges
        .iter()
        .copied()
        .filter(|r| r.from > on_date)
        .collect();
    upcoming.sort_by_key(|r| r.from);

    SeasonView {
        status,
        ui_badge: status.badge().to_string(),
        closed_ranges: ranges.to_vec(),
        next_closed_range: upcoming.first().copied(),
    }
}
