//! Request bodies and path identifiers
//!
//! Bodies are taken as loose JSON and checked by hand so a wrong type
//! (e.g. `"is_open": "yes"`) is a 400 with a field-level message.

use serde_json::Value;

use super::ValidationError;

/// Upper bound on ids accepted by `POST /v1/menu/validate`.
pub const MAX_VALIDATE_IDS: usize = 500;

/// Positive integer id taken from a path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(i64);

impl RecordId {
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, ValidationError> {
        let id: i64 = raw.trim().parse().map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer",
        })?;
        Self::new(field, id)
    }

    pub fn new(field: &'static str, id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::OutOfRange {
                field,
                reason: "must be a positive integer",
            });
        }
        Ok(Self(id))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

/// `POST /v1/menu/validate` body: `{"item_ids": [1, 2, 3]}`
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateMenuRequest {
    pub item_ids: Vec<i64>,
}

impl TryFrom<&Value> for ValidateMenuRequest {
    type Error = ValidationError;

    fn try_from(body: &Value) -> Result<Self, Self::Error> {
        let ids = match body.get("item_ids") {
            None | Some(Value::Null) => return Err(ValidationError::Empty { field: "item_ids" }),
            Some(Value::Array(ids)) => ids,
            Some(_) => {
                return Err(ValidationError::InvalidFormat {
                    field: "item_ids",
                    reason: "must be an array of integers",
                })
            }
        };

        if ids.is_empty() {
            return Err(ValidationError::Empty { field: "item_ids" });
        }
        if ids.len() > MAX_VALIDATE_IDS {
            return Err(ValidationError::TooMany {
                field: "item_ids",
                max: MAX_VALIDATE_IDS,
            });
        }

        let item_ids = ids
            .iter()
            .map(|v| {
                v.as_i64()
                    .ok_or(ValidationError::InvalidFormat {
                        field: "item_ids",
                        reason: "must be an array of integers",
                    })
                    .and_then(|id| RecordId::new("item_ids", id))
                    .map(|id| id.get())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { item_ids })
    }
}

/// `PUT /v1/restaurants/{id}/open` body: `{"is_open": true}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOpenRequest {
    pub is_open: bool,
}

impl TryFrom<&Value> for SetOpenRequest {
    type Error = ValidationError;

    fn try_from(body: &Value) -> Result<Self, Self::Error> {
        match body.get("is_open") {
            Some(Value::Bool(is_open)) => Ok(Self { is_open: *is_open }),
            None | Some(Value::Null) => Err(ValidationError::Empty { field: "is_open" }),
            Some(_) => Err(ValidationError::InvalidFormat {
                field: "is_open",
                reason: "must be a boolean",
            }),
        }
    }
}
