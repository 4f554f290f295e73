//! Readiness and initialization lifecycle: poll until healthy, then init once.

use crate::container::Container;
use crate::error::LifecycleError;
use crate::preset::Preset;
use std::time::{Duration, Instant};
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

/// Default interval between healthcheck attempts
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_millis(250);

/// How the healthcheck is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Total budget for reaching a healthy state
    pub timeout: Duration,
    /// Pause between failed attempts
    pub interval: Duration,
}

impl WaitConfig {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: HEALTH_CHECK_INTERVAL,
        }
    }

    /// Use the preset's own wait timeout.
    pub fn for_preset<P: Preset + ?Sized>(preset: &P) -> Self {
        Self::new(preset.wait_timeout())
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Call the healthcheck until it succeeds or the budget runs out.
///
/// Every error is treated as "not ready yet". Each attempt is cut off at the
/// remaining budget so a hung connection cannot outlive the timeout.
pub async fn wait_for_healthy<P: Preset + ?Sized>(
    preset: &P,
    container: &Container,
    config: &WaitConfig,
) -> Result<(), LifecycleError<P::Error>> {
    info!(
        "Waiting for {} ({}) to be healthy, timeout {:?}",
        preset.image(),
        container.id,
        config.timeout
    );

    let start = Instant::now();
    let mut attempts = 0u32;
    let mut last_error = None;

    loop {
        let remaining = config.timeout.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            return Err(LifecycleError::Timeout {
                waited: start.elapsed(),
                last_error,
            });
        }

        attempts += 1;
        match timeout(remaining, preset.healthcheck(container)).await {
            Ok(Ok(())) => {
                debug!(
                    "{} is healthy after {:?} ({} attempts)",
                    container.id,
                    start.elapsed(),
                    attempts
                );
                return Ok(());
            }
            Ok(Err(e)) => {
                debug!("Healthcheck attempt {} failed: {}", attempts, e);
                last_error = Some(e);
            }
            Err(_) => {
                debug!("Healthcheck attempt {} hit the wait timeout", attempts);
            }
        }

        let remaining = config.timeout.saturating_sub(start.elapsed());
        sleep(config.interval.min(remaining)).await;
    }
}

/// Run the preset's init routine once.
pub async fn initialize<P: Preset + ?Sized>(
    preset: &P,
    container: &Container,
) -> Result<(), LifecycleError<P::Error>> {
    debug!("Initializing {}", container.id);
    preset
        .init(container)
        .await
        .map_err(LifecycleError::Init)
}

/// Wait for the container to become healthy, then initialize it.
pub async fn ready<P: Preset + ?Sized>(
    preset: &P,
    container: &Container,
) -> Result<(), LifecycleError<P::Error>> {
    wait_for_healthy(preset, container, &WaitConfig::for_preset(preset)).await?;
    initialize(preset, container).await?;
    info!("{} is ready", container.id);
    Ok(())
}
