//! # Species API
//!
//! Catalogue listing plus the single-species rule snapshot. The snapshot
//! endpoint requires a `zone` query parameter (a species' rules only mean
//! something inside a zone) and participates in the conditional-retrieval
//! protocol.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use frs_core::model::Species;
use frs_core::{cache, compose_at};

use crate::conditional;
use crate::error::AppError;
use crate::routes::parse_on_date;
use crate::state::AppState;

/// Query parameters for the single-species snapshot.
#[derive(Debug, Deserialize)]
pub struct SnapshotQuery {
    pub zone: Option<String>,
    #[serde(rename = "onDate")]
    pub on_date: Option<String>,
}

/// Build the species router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/species", get(list_species))
        .route("/api/v1/species/:code", get(get_species))
}

/// GET /api/v1/species — the species catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/species",
    responses(
        (status = 200, description = "All catalogued species, in code order", body = [Species]),
    ),
    tag = "species"
)]
pub async fn list_species(
    State(state): State<AppState>,
) -> Result<Json<Vec<Species>>, AppError> {
    let mut out = Vec::new();
    for code in state.source.all_species_codes().await? {
        if let Some(species) = state.source.species_by_code(&code).await? {
            out.push(species);
        }
    }
    Ok(Json(out))
}

/// GET /api/v1/species/:code — rule snapshot for one species in one zone.
#[utoipa::path(
    get,
    path = "/api/v1/species/{code}",
    params(
        ("code" = String, Path, description = "Species code"),
        ("zone" = String, Query, description = "Zone code (required)"),
        ("onDate" = Option<String>, Query, description = "Query date YYYY-MM-DD, defaults to today (UTC)"),
    ),
    responses(
        (status = 200, description = "Composed rule snapshot", body = frs_core::model::Snapshot),
        (status = 304, description = "Client copy still valid"),
        (status = 404, description = "Species or zone unknown", body = crate::error::ErrorBody),
        (status = 422, description = "Missing zone or malformed date", body = crate::error::ErrorBody),
    ),
    tag = "species"
)]
pub async fn get_species(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<SnapshotQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let zone = match query.zone.as_deref() {
        Some(z) if !z.is_empty() => z.to_string(),
        _ => return Err(AppError::MissingParameter("zone".to_string())),
    };
    let on_date = parse_on_date(query.on_date.as_deref())?;

    // One version read drives both the validator and the snapshot stamp.
    let stamp = state.source.current_version().await?;
    let tag = cache::rules_tag(stamp.id, &zone, Some(code.as_str()), on_date);
    if conditional::revalidates(&headers, &tag) {
        return Ok(conditional::not_modified(&tag));
    }

    let snapshot = compose_at(state.source.as_ref(), &code, &zone, on_date, &stamp)
        .await?
        .ok_or_else(|| AppError::NotFound("No data found for species/zone".to_string()))?;

    Ok(conditional::json_with_tag(&tag, snapshot))
}
