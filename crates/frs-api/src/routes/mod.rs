//! # API Route Modules
//!
//! - `species` — species catalogue and single-species rule snapshots.
//! - `rules` — the combined per-zone accessor: zone-wide aggregate or a
//!   single species snapshot via the `species` query, with the full
//!   conditional-retrieval protocol on both shapes.

pub mod rules;
pub mod species;

use chrono::NaiveDate;

use crate::error::AppError;

/// Parse an optional `onDate` query value.
///
/// Absent or empty means "today" (resolved later, in the core). Anything
/// else must be a well-formed `YYYY-MM-DD`; a malformed date is a caller
/// error, never silently defaulted.
pub(crate) fn parse_on_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::Validation(format!("invalid onDate '{s}', expected YYYY-MM-DD"))),
    }
}
