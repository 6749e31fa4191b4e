//! # frs-api — Axum HTTP Surface
//!
//! Read-only HTTP surface over the regulation snapshot core.
//!
//! ## API Surface
//!
//! | Route                            | Module               | Shape                         |
//! |----------------------------------|----------------------|-------------------------------|
//! | `GET /api/v1/species`            | [`routes::species`]  | Species catalogue             |
//! | `GET /api/v1/species/:code`      | [`routes::species`]  | Single snapshot (zone query)  |
//! | `GET /api/v1/zone/:code/rules`   | [`routes::rules`]    | Zone aggregate / snapshot     |
//! | `GET /openapi.json`              | [`openapi`]          | OpenAPI 3.x spec              |
//! | `GET /health/liveness`           | here                 | Process up                    |
//! | `GET /health/readiness`          | here                 | Rule source reachable         |
//!
//! Snapshot-bearing routes speak the conditional-retrieval protocol: a weak
//! `ETag` on every 200, `If-None-Match` honored with a 304 short-circuit.
//! CORS exposes the `ETag` header so browser clients can revalidate.

pub mod conditional;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes stay outside the API prefix so deployment tooling can hit
/// them without knowing the surface.
pub fn app(state: AppState) -> Router {
    // Browser clients must be able to read the validator off the response.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .expose_headers([header::ETAG]);

    Router::new()
        .merge(routes::species::router())
        .merge(routes::rules::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the rule source answers a version read.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.source.current_version().await {
        Ok(_) => (StatusCode::OK, "ready").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "rule source unreachable").into_response()
        }
    }
}
