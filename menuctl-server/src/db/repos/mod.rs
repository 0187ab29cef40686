//! Repository implementations for database access
//!
//! Repositories borrow a `QueryExecutor`, so handlers run against the real
//! pool in production and a `MockExecutor` in tests.

pub mod menu;
pub mod restaurants;

pub use menu::MenuRepo;
pub use restaurants::RestaurantRepo;
