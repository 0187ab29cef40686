//! Typed list filters built from raw query strings
//!
//! Query parameters arrive as optional strings and are validated field by
//! field: blank means absent, malformed means 400, and everything else gets
//! a deterministic value.

use serde::Deserialize;

use super::pagination::{Page, MENU_LIST_LIMIT, RESTAURANT_LIST_LIMIT};
use super::ValidationError;

/// Raw `GET /v1/restaurants` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantListParams {
    pub city: Option<String>,
    pub cuisine: Option<String>,
    pub min_rating: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Validated restaurant listing filter
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantFilter {
    pub city: Option<String>,
    pub cuisine: Option<String>,
    pub min_rating: Option<f64>,
    pub page: Page,
}

impl Default for RestaurantFilter {
    fn default() -> Self {
        Self {
            city: None,
            cuisine: None,
            min_rating: None,
            page: Page::new(RESTAURANT_LIST_LIMIT, 0),
        }
    }
}

impl TryFrom<RestaurantListParams> for RestaurantFilter {
    type Error = ValidationError;

    fn try_from(params: RestaurantListParams) -> Result<Self, Self::Error> {
        Ok(Self {
            city: non_blank(params.city),
            cuisine: non_blank(params.cuisine),
            min_rating: parse_rating(params.min_rating.as_deref())?,
            page: Page::parse(
                params.limit.as_deref(),
                params.offset.as_deref(),
                RESTAURANT_LIST_LIMIT,
            )?,
        })
    }
}

/// Raw `GET /v1/restaurants/{id}/menu` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuListParams {
    pub available: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Validated menu listing filter (the restaurant id comes from the path)
#[derive(Debug, Clone, PartialEq)]
pub struct MenuFilter {
    pub available: Option<bool>,
    pub category: Option<String>,
    pub page: Page,
}

impl Default for MenuFilter {
    fn default() -> Self {
        Self {
            available: None,
            category: None,
            page: Page::new(MENU_LIST_LIMIT, 0),
        }
    }
}

impl TryFrom<MenuListParams> for MenuFilter {
    type Error = ValidationError;

    fn try_from(params: MenuListParams) -> Result<Self, Self::Error> {
        Ok(Self {
            available: parse_flag(params.available.as_deref())?,
            category: non_blank(params.category),
            page: Page::parse(
                params.limit.as_deref(),
                params.offset.as_deref(),
                MENU_LIST_LIMIT,
            )?,
        })
    }
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

fn parse_rating(raw: Option<&str>) -> Result<Option<f64>, ValidationError> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let rating: f64 = s.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "min_rating",
        reason: "must be a number",
    })?;

    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "min_rating",
            reason: "must be between 0 and 5",
        });
    }

    Ok(Some(rating))
}

fn parse_flag(raw: Option<&str>) -> Result<Option<bool>, ValidationError> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match s.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(Some(true)),
        "false" | "0" => Ok(Some(false)),
        _ => Err(ValidationError::InvalidFormat {
            field: "available",
            reason: "must be true or false",
        }),
    }
}
