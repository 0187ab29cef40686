//! Server and database configuration
//!
//! Defaults match the documented environment variables; the CLI layers
//! env/flag overrides on top via clap.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Connection settings and pool/startup limits.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,

    /// Upper bound on concurrently checked-out connections
    pub max_connections: u32,

    /// How long `acquire()` waits for a free connection
    pub acquire_timeout: Duration,

    /// Startup gate: total probe attempts before giving up
    pub startup_max_attempts: u32,

    /// Startup gate: pause between failed probes
    pub startup_delay: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            database: "restaurants".to_string(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
            startup_max_attempts: 10,
            startup_delay: Duration::from_millis(2000),
        }
    }
}

impl DatabaseConfig {
    /// Build sqlx connect options from the individual fields.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    /// `host:port/database` for log lines.
    pub fn display_target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

// Manual impl so the password never reaches a log line.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("startup_max_attempts", &self.startup_max_attempts)
            .field("startup_delay", &self.startup_delay)
            .finish()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    pub cors_permissive: bool,

    /// Per-request deadline; requests exceeding it get 408
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000),
            cors_permissive: false,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.user, "postgres");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "restaurants");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.display_target(), "localhost:5432/restaurants");
    }

    #[test]
    fn debug_redacts_password() {
        let config = DatabaseConfig {
            password: "hunter2".to_string(),
            ..DatabaseConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(!config.cors_permissive);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
