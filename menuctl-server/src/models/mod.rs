//! Request models with validation at construction
//!
//! All client input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod filters;
pub mod pagination;
pub mod requests;
pub mod validation;

pub use filters::{MenuFilter, MenuListParams, RestaurantFilter, RestaurantListParams};
pub use pagination::Page;
pub use requests::{RecordId, SetOpenRequest, ValidateMenuRequest};
pub use validation::ValidationError;
