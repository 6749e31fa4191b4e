//! # Conditional-Request Glue
//!
//! Maps the core's tag protocol onto HTTP: reads `If-None-Match` from the
//! request, and attaches `ETag` to both `304 Not Modified` short-circuits
//! and full `200` payloads. Nothing is stored server-side; the tag is
//! recomputed from the version counter on every request and the cache
//! lives entirely at the client.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Whether the request's `If-None-Match` (if any) matches the current tag.
pub fn revalidates(headers: &HeaderMap, current_tag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(|v| frs_core::cache::if_none_match_matches(v, current_tag))
        .unwrap_or(false)
}

/// `304 Not Modified` carrying the validator, no body.
pub fn not_modified(tag: &str) -> Response {
    (
        StatusCode::NOT_MODIFIED,
        [(header::ETAG, tag.to_string())],
    )
        .into_response()
}

/// Full JSON payload stamped with the validator.
pub fn json_with_tag<T: Serialize>(tag: &str, payload: T) -> Response {
    (
        StatusCode::OK,
        [(header::ETAG, tag.to_string())],
        Json(payload),
    )
        .into_response()
}
