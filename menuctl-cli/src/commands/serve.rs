//! HTTP server command
//!
//! Waits for the database behind the startup gate, then serves the API.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use menuctl_server::{run_server, AppState, DatabaseConfig, DbPool, ServerConfig, StartupGate};

/// Exit status when the database never became reachable.
pub const EXIT_STARTUP_FAILURE: i32 = 1;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "postgres", hide_env_values = true)]
    pub db_password: String,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "restaurants")]
    pub db_name: String,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,

    /// Seconds to wait for a free pooled connection
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub db_acquire_timeout_secs: u64,

    /// Startup attempts before giving up on the database
    #[arg(long, env = "STARTUP_MAX_ATTEMPTS", default_value_t = 10)]
    pub startup_max_attempts: u32,

    /// Milliseconds between startup attempts
    #[arg(long, env = "STARTUP_DELAY_MS", default_value_t = 2000)]
    pub startup_delay_ms: u64,

    /// HTTP listening port
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// HTTP bind address
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub bind_host: IpAddr,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            host: self.db_host.clone(),
            port: self.db_port,
            database: self.db_name.clone(),
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout_secs),
            startup_max_attempts: self.startup_max_attempts,
            startup_delay: Duration::from_millis(self.startup_delay_ms),
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.bind_host, self.port),
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Run the HTTP server
///
/// Exits the process with [`EXIT_STARTUP_FAILURE`] when the startup gate
/// runs out of attempts.
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = args.database_config();
    let server_config = args.server_config();
    tracing::debug!(?db_config, ?server_config, "configuration loaded");

    tracing::info!("Waiting for database at {}", db_config.display_target());
    let pool = DbPool::new(&db_config);
    let gate = StartupGate::new(db_config.startup_max_attempts, db_config.startup_delay);

    if let Err(err) = gate.wait_for_ready(&pool).await {
        tracing::error!(error = %err, "database unreachable, exiting");
        std::process::exit(EXIT_STARTUP_FAILURE);
    }

    tracing::info!("Starting menuctl server on {}", server_config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(AppState::from_pool(pool.clone()), server_config)
        .await
        .context("Server error")?;

    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ServeArgs,
    }

    #[test]
    fn flags_map_to_configs() {
        let wrapper = Wrapper::parse_from([
            "menuctl",
            "--db-host",
            "db.internal",
            "--db-port",
            "6543",
            "--port",
            "8080",
            "--startup-max-attempts",
            "3",
            "--startup-delay-ms",
            "250",
        ]);

        let db = wrapper.args.database_config();
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.port, 6543);
        assert_eq!(db.startup_max_attempts, 3);
        assert_eq!(db.startup_delay, Duration::from_millis(250));

        let server = wrapper.args.server_config();
        assert_eq!(server.bind_addr.port(), 8080);
    }
}
