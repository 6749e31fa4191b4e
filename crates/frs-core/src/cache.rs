//! # Conditional-Cache Tag Protocol
//!
//! Weak-validator tags over the identifying tuple
//! `(version, zone, species?, on_date?)`. The server stores nothing: a tag
//! is recomputed from the Version Authority on every request, and the
//! "cache" lives entirely at the client.
//!
//! Tag equality asserts semantic equivalence of the payload, not
//! byte-identical representation, hence the `W/` prefix. The date segment
//! reflects the request's optional date, empty when omitted: a request
//! without an explicit date revalidates against whatever "today" resolves
//! to at composition time, exactly as the version counter intends.

use chrono::NaiveDate;

/// Derive the weak validator for a rules request.
///
/// `species_code` is `None` for the zone-wide aggregate; the slot is filled
/// with `all` so the two shapes can never collide at the same version.
pub fn rules_tag(
    version_id: i64,
    zone_code: &str,
    species_code: Option<&str>,
    on_date: Option<NaiveDate>,
) -> String {
    let species = species_code.unwrap_or("all");
    let date = on_date.map(|d| d.to_string()).unwrap_or_default();
    format!("W/\"rules-v{version_id}-{zone_code}-{species}-{date}\"")
}

/// Normalize a client-supplied tag: strip the weak prefix and surrounding
/// quotes so weak/strong and quoted/bare presentations compare equal.
pub fn normalize(tag: &str) -> &str {
    let tag = tag.trim();
    let tag = tag
        .strip_prefix("W/")
        .or_else(|| tag.strip_prefix("w/"))
        .unwrap_or(tag);
    tag.trim_matches('"')
}

/// Whether an `If-None-Match` header value matches the current tag.
///
/// The header may carry a comma-separated candidate list; the wildcard `*`
/// matches any current representation.
pub fn if_none_match_matches(header: &str, current_tag: &str) -> bool {
    let current = normalize(current_tag);
    header
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .any(|candidate| candidate == "*" || normalize(candidate) == current)
}
