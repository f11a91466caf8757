//! Link Resolver
//!
//! Classifies a path found inside a fetched table. The API nests items one
//! level under their collection, so an item pattern such as
//! `/api/classes/*` covers every class. Deeper links like
//! `/api/classes/wizard/levels` fall back one more level to the same
//! pattern.

use super::registry::{get_kind, ResourceKind, WILDCARD};
use std::borrow::Cow;

/// How many trailing segments are tried as wildcards
const WILDCARD_LEVELS: usize = 2;

/// Resolve a path to the most specific registered kind.
///
/// Exact match first, then the path with its final segment replaced by a
/// wildcard, then the same one level higher, then [`ResourceKind::Generic`].
pub fn resolve(path: &str) -> ResourceKind {
    let path = absolute_path(path);
    let path = normalize(&path);

    if let Some(kind) = get_kind(path) {
        return kind;
    }

    for levels in 1..=WILDCARD_LEVELS {
        if let Some(kind) = get_kind(&wildcard_pattern(path, levels)) {
            return kind;
        }
    }

    tracing::debug!("No registered pattern for {}", path);
    ResourceKind::Generic
}

/// Replace the last `levels` segments of a path with one wildcard.
///
/// `/api/classes/wizard` with one level gives `/api/classes/*`.
pub fn wildcard_pattern(path: &str, levels: usize) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let keep = segments.len().saturating_sub(levels);
    format!("{}/{}", segments[..keep].join("/"), WILDCARD)
}

/// Root a relative path at `/`, the way the client joins it to the API root
pub fn absolute_path(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{}", path))
    }
}

/// Trim trailing slashes, keeping a bare `/`
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        &path[..path.len().min(1)]
    } else {
        trimmed
    }
}
