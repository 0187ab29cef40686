//! SQL construction helpers
//!
//! Pure functions only; nothing in here touches the database.

pub mod filter;
pub mod placeholders;

pub use filter::{placeholder_positions, BuiltQuery, FilterBuilder};
pub use placeholders::in_list_placeholders;
