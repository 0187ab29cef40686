//! Validation error types

use std::fmt;

/// Client input failed a structural check.
///
/// Always surfaces as 400 and is raised before any database access.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field missing or empty
    Empty { field: &'static str },

    /// Value could not be parsed into the expected type
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Value parsed but is outside the accepted range
    OutOfRange { field: &'static str, reason: &'static str },

    /// List longer than allowed
    TooMany { field: &'static str, max: usize },

    /// Request body is not valid JSON
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required and cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::OutOfRange { field, reason } => write!(f, "{} out of range: {}", field, reason),
            Self::TooMany { field, max } => {
                write!(f, "{} exceeds maximum of {} entries", field, max)
            }
            Self::MalformedBody { reason } => write!(f, "malformed JSON body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
