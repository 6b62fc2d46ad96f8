//! Selection logic behind `GET /api/videos`.
//!
//! Two modes share the same filtering step:
//! - `random` returns one uniformly chosen entry,
//! - `paged` returns a fixed-size window that walks the filtered list
//!   circularly, starting at `(page * limit) mod total`.

use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use std::sync::Mutex;

use super::media::{normalize_extension, MediaEntry, MediaList};

/// Upper bound on a paged window, so a huge `limit` cannot exhaust memory.
pub const MAX_LIMIT: usize = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    /// One random entry per request.
    #[default]
    Random,
    /// Circular window selected by `page` and `limit`.
    Paged,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown listing mode {0:?} (expected \"random\" or \"paged\")")]
pub struct ParseModeError(String);

impl FromStr for ListingMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "paged" => Ok(Self::Paged),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

impl fmt::Display for ListingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::Paged => f.write_str("paged"),
        }
    }
}

/// Raw query string of a listing request. Numbers stay strings here so a
/// malformed value falls back to its default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub types: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Accepted extensions for one request; `None` accepts everything.
/// Only an absent or empty `types` parameter accepts everything; one made of
/// blanks or separators yields an empty set that matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    accepted: Option<HashSet<String>>,
}

impl TypeFilter {
    pub fn parse(param: Option<&str>) -> Self {
        let accepted = param
            .filter(|p| !p.is_empty())
            .map(|p| p.split(',').filter_map(normalize_extension).collect());
        Self { accepted }
    }

    pub fn accepts(&self, entry: &MediaEntry) -> bool {
        match &self.accepted {
            None => true,
            Some(set) => entry.extension().is_some_and(|ext| set.contains(ext)),
        }
    }

    /// Matching entries in their original order.
    pub fn apply<'a>(&self, entries: &'a [MediaEntry]) -> Vec<&'a MediaEntry> {
        entries.iter().filter(|e| self.accepts(e)).collect()
    }
}

pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0)
}

/// Window size for a paged request, within `1..=MAX_LIMIT`. Values too large
/// for an integer saturate to `MAX_LIMIT`; anything else invalid is `default`.
pub fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    let default = default.clamp(1, MAX_LIMIT);
    match raw.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(n)) if n > 0 => usize::try_from(n).map_or(MAX_LIMIT, |n| n.min(MAX_LIMIT)),
        Some(Err(e)) if *e.kind() == IntErrorKind::PosOverflow => MAX_LIMIT,
        _ => default,
    }
}

/// First index of a paged window. Euclidean remainder keeps negative pages
/// in range; i128 keeps `page * limit` from overflowing.
pub fn window_start(total: usize, page: i64, limit: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (page as i128 * limit as i128).rem_euclid(total as i128) as usize
}

/// Exactly `limit` entries walking `entries` circularly from the page start.
pub fn page_window<'a>(entries: &[&'a MediaEntry], page: i64, limit: usize) -> Vec<&'a MediaEntry> {
    let total = entries.len();
    if total == 0 {
        return Vec::new();
    }
    let start = window_start(total, page, limit);
    (0..limit).map(|i| entries[(start + i) % total]).collect()
}

pub fn pick_random<'a, R: Rng + ?Sized>(entries: &[&'a MediaEntry], rng: &mut R) -> Option<&'a MediaEntry> {
    if entries.is_empty() {
        return None;
    }
    Some(entries[rng.gen_range(0..entries.len())])
}

/// Answer one listing request against the frozen list.
///
/// The generator is only locked in random mode, for a single draw.
pub fn select<'a, R: Rng>(
    media: &'a MediaList,
    query: &ListQuery,
    mode: ListingMode,
    default_limit: usize,
    rng: &Mutex<R>,
) -> Vec<&'a MediaEntry> {
    if media.is_empty() {
        return Vec::new();
    }

    let filtered = TypeFilter::parse(query.types.as_deref()).apply(media.entries());
    if filtered.is_empty() {
        return Vec::new();
    }

    match mode {
        ListingMode::Random => {
            let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            pick_random(&filtered, &mut *rng).into_iter().collect()
        }
        ListingMode::Paged => {
            let page = parse_page(query.page.as_deref());
            let limit = parse_limit(query.limit.as_deref(), default_limit);
            page_window(&filtered, page, limit)
        }
    }
}
