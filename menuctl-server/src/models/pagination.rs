//! Limit/offset bounds
//!
//! Result sets are never unbounded: a missing limit falls back to a
//! per-endpoint default and every limit is clamped to `1..=MAX_LIMIT`.

use super::ValidationError;

/// Largest page a client may request.
pub const MAX_LIMIT: i64 = 200;

/// Largest offset a client may request.
pub const MAX_OFFSET: i64 = 100_000;

/// Default page size for `/v1/restaurants`.
pub const RESTAURANT_LIST_LIMIT: i64 = 50;

/// Default page size for `/v1/restaurants/{id}/menu`.
pub const MENU_LIST_LIMIT: i64 = 100;

/// Validated LIMIT/OFFSET pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    /// Clamp into bounds: limit to `1..=MAX_LIMIT`, offset to `0..=MAX_OFFSET`.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.clamp(0, MAX_OFFSET),
        }
    }

    /// Parse raw query values. Absent or blank values take the defaults;
    /// anything that is not an integer is rejected.
    pub fn parse(
        limit: Option<&str>,
        offset: Option<&str>,
        default_limit: i64,
    ) -> Result<Self, ValidationError> {
        let limit = parse_int("limit", limit)?.unwrap_or(default_limit);
        let offset = parse_int("offset", offset)?.unwrap_or(0);
        Ok(Self::new(limit, offset))
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

fn parse_int(field: &'static str, raw: Option<&str>) -> Result<Option<i64>, ValidationError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: "must be an integer",
        }),
    }
}
