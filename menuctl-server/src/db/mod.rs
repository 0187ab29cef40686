//! Database layer - pool, startup gate, executor and repositories
//!
//! # Design Principles
//!
//! - One bounded `PgPool`, injected through `AppState` - no globals
//! - Connections are scoped guards, released on every exit path
//! - Values only ever travel as bound `$n` parameters
//! - Query errors are never retried; only startup connectivity is

pub mod error;
pub mod executor;
pub mod gate;
pub mod pool;
pub mod repos;
pub mod value;

pub use error::DbError;
pub use executor::{MockExecutor, PgExecutor, QueryExecutor, Row};
pub use gate::{ReadinessProbe, StartupError, StartupGate};
pub use pool::DbPool;
pub use repos::{MenuRepo, RestaurantRepo};
pub use value::SqlValue;
