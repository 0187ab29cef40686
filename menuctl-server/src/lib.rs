//! menuctl-server: HTTP server for restaurant and menu records
//!
//! Exposes filtered listings, single lookups, a batch menu validation
//! endpoint and the restaurant open/closed toggle over a Postgres pool.
//!
//! Layers, leaf first:
//! - `db` - pool, startup gate, query executor, repositories
//! - `query` - dynamic WHERE/LIMIT builder and IN-list placeholders
//! - `models` - typed request filters and bodies, validated at construction
//! - `http` - axum router, extractors, JSON error mapping

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod query;

pub use config::{DatabaseConfig, ServerConfig};
pub use db::{DbError, DbPool, StartupError, StartupGate};
pub use http::{build_router, run_server, AppState, ServerError};
