//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single spec served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the rules API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FRS API — Fishing Regulation Snapshots",
        version = "0.1.0",
        description = "Read-only fishing rule snapshots composed per (species, zone, date), with version-stamped conditional retrieval.",
        license(name = "Apache-2.0")
    ),
    paths(
        crate::routes::species::list_species,
        crate::routes::species::get_species,
        crate::routes::rules::zone_rules,
    ),
    components(schemas(
        // Domain types
        frs_core::model::Species,
        frs_core::model::Zone,
        frs_core::model::Snapshot,
        frs_core::model::ZoneRules,
        frs_core::model::SizeLimitsView,
        frs_core::model::QuotasView,
        frs_core::model::SeasonView,
        frs_core::model::SeasonStatus,
        frs_core::model::SeasonWindow,
        frs_core::model::ClosedRange,
        frs_core::model::ZoneRestriction,
        frs_core::model::SnapshotMeta,
        frs_core::model::VersionStamp,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "species", description = "Species catalogue and per-species snapshots"),
        (name = "rules", description = "Zone-wide rule aggregation with conditional retrieval"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — the assembled spec.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
