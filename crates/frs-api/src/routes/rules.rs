//! # Zone Rules API
//!
//! The original combined accessor: `GET /api/v1/zone/:zoneCode/rules`
//! returns the zone-wide aggregate, or a single-species snapshot when the
//! `species` query is present. Both shapes carry a weak `ETag` derived from
//! the current regulation version, and a matching `If-None-Match` request
//! short-circuits composition entirely.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use frs_core::{aggregate_zone_at, cache, compose_at};

use crate::conditional;
use crate::error::AppError;
use crate::routes::parse_on_date;
use crate::state::AppState;

/// Query parameters for the zone rules accessor.
#[derive(Debug, Deserialize)]
pub struct ZoneRulesQuery {
    pub species: Option<String>,
    #[serde(rename = "onDate")]
    pub on_date: Option<String>,
}

/// Build the zone rules router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/zone/:zone_code/rules", get(zone_rules))
}

/// GET /api/v1/zone/:zoneCode/rules — zone aggregate or single snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/zone/{zone_code}/rules",
    params(
        ("zone_code" = String, Path, description = "Zone code"),
        ("species" = Option<String>, Query, description = "Restrict to one species"),
        ("onDate" = Option<String>, Query, description = "Query date YYYY-MM-DD, defaults to today (UTC)"),
    ),
    responses(
        (status = 200, description = "Zone-wide rules or a single snapshot", body = frs_core::model::ZoneRules),
        (status = 304, description = "Client copy still valid"),
        (status = 404, description = "Zone (or species/zone pair) unknown", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed date", body = crate::error::ErrorBody),
    ),
    tag = "rules"
)]
pub async fn zone_rules(
    State(state): State<AppState>,
    Path(zone_code): Path<String>,
    Query(query): Query<ZoneRulesQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let species = query.species.as_deref().filter(|s| !s.is_empty());
    let on_date = parse_on_date(query.on_date.as_deref())?;

    // One version read drives the validator, the short-circuit decision,
    // and the stamp on everything composed below; no tearing.
    let stamp = state.source.current_version().await?;
    let tag = cache::rules_tag(stamp.id, &zone_code, species, on_date);
    if conditional::revalidates(&headers, &tag) {
        return Ok(conditional::not_modified(&tag));
    }

    match species {
        Some(species_code) => {
            let snapshot =
                compose_at(state.source.as_ref(), species_code, &zone_code, on_date, &stamp)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound("No data found for species/zone".to_string())
                    })?;
            Ok(conditional::json_with_tag(&tag, snapshot))
        }
        None => {
            let rules = aggregate_zone_at(state.source.as_ref(), &zone_code, on_date, &stamp)
                .await?
                .ok_or_else(|| AppError::NotFound("No data for zone".to_string()))?;
            Ok(conditional::json_with_tag(&tag, rules))
        }
    }
}
