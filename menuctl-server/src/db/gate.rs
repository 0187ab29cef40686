//! Startup gate - hold the service back until the database answers
//!
//! In orchestrated deployments the database may come up after this
//! process. The gate probes with acquire-then-release a bounded number of
//! times, sleeping a fixed delay between failures. Exhaustion is terminal.

use std::time::Duration;

use async_trait::async_trait;

use super::error::DbError;

/// Something that can prove the database is reachable.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    async fn probe(&self) -> Result<(), DbError>;
}

/// Startup failed for good.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database not reachable after {attempts} attempt(s): {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: DbError,
    },
}

/// Bounded retry loop around a [`ReadinessProbe`].
#[derive(Debug, Clone, Copy)]
pub struct StartupGate {
    max_attempts: u32,
    delay: Duration,
}

impl StartupGate {
    /// `max_attempts` of 0 is treated as 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Probe until success or until attempts run out.
    ///
    /// Returns the number of retries it took (0 when the first probe
    /// succeeds). No sleep follows the final failed attempt.
    pub async fn wait_for_ready<P>(&self, probe: &P) -> Result<u32, StartupError>
    where
        P: ReadinessProbe + ?Sized,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match probe.probe().await {
                Ok(()) => {
                    if attempt > 1 {
                        tracing::info!(attempt, "database reachable after retrying");
                    } else {
                        tracing::info!("database reachable");
                    }
                    return Ok(attempt - 1);
                }
                Err(e) if attempt >= self.max_attempts => {
                    tracing::error!(
                        attempts = attempt,
                        error = %e,
                        "giving up waiting for database"
                    );
                    return Err(StartupError::Exhausted {
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        kind = e.kind(),
                        error = %e,
                        "database not ready, retrying in {:?}",
                        self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` probes, then succeeds.
    struct FlakyProbe {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyProbe {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReadinessProbe for FlakyProbe {
        async fn probe(&self) -> Result<(), DbError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(DbError::Connection(sqlx::Error::PoolTimedOut))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_three_retries() {
        let probe = FlakyProbe::new(3);
        let gate = StartupGate::new(5, Duration::from_millis(500));

        let started = tokio::time::Instant::now();
        let retries = gate.wait_for_ready(&probe).await.expect("gate should open");

        assert_eq!(retries, 3);
        assert_eq!(probe.calls(), 4);
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn first_probe_success_does_not_sleep() {
        let probe = FlakyProbe::new(0);
        let gate = StartupGate::new(5, Duration::from_secs(10));

        let started = tokio::time::Instant::now();
        assert_eq!(gate.wait_for_ready(&probe).await.unwrap(), 0);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_after_max_attempts() {
        let probe = FlakyProbe::new(u32::MAX);
        let gate = StartupGate::new(2, Duration::from_millis(100));

        let err = gate.wait_for_ready(&probe).await.unwrap_err();
        let StartupError::Exhausted { attempts, source } = err;
        assert_eq!(attempts, 2);
        assert!(matches!(source, DbError::Connection(_)));
        assert_eq!(probe.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_probes_once() {
        let probe = FlakyProbe::new(u32::MAX);
        let gate = StartupGate::new(0, Duration::from_millis(100));
        assert_eq!(gate.max_attempts(), 1);

        assert!(gate.wait_for_ready(&probe).await.is_err());
        assert_eq!(probe.calls(), 1);
    }
}
