//! Database error type

/// Errors surfaced by the pool, executor and repositories
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Could not obtain a connection (database unreachable or pool timed out)
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Statement failed once a connection was held
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),

    /// A result column has a Postgres type the row decoder does not map
    #[error("unsupported column type {type_name} for column '{column}'")]
    UnsupportedColumn { column: String, type_name: String },
}

impl DbError {
    /// Short category for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connection(e) => match e {
                sqlx::Error::PoolTimedOut => "pool_timeout",
                sqlx::Error::PoolClosed => "pool_closed",
                sqlx::Error::Io(_) => "io",
                sqlx::Error::Tls(_) => "tls",
                _ => "connection",
            },
            Self::Query(_) => "query",
            Self::UnsupportedColumn { .. } => "decode",
        }
    }
}
