//! The capability set a container preset provides to the orchestrator.

use crate::container::Container;
use crate::ports::NamedPorts;
use async_trait::async_trait;
use std::time::Duration;

/// Default ceiling for how long the orchestrator waits for a healthy container.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// A reusable container configuration.
///
/// The orchestrator starts [`Preset::image`] with [`Preset::env`], exposing
/// [`Preset::ports`]. It then calls [`Preset::healthcheck`] repeatedly until it
/// succeeds or [`Preset::wait_timeout`] elapses, and finally calls
/// [`Preset::init`] exactly once.
#[async_trait]
pub trait Preset: Send + Sync {
    /// Error returned by the healthcheck and init routines.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Full image reference, e.g. `registry/name:tag`.
    fn image(&self) -> String;

    /// Ports the service listens on inside the container.
    fn ports(&self) -> NamedPorts;

    /// Environment variables passed to the container.
    fn env(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// How long the orchestrator retries the healthcheck before giving up.
    fn wait_timeout(&self) -> Duration {
        DEFAULT_WAIT_TIMEOUT
    }

    /// One readiness attempt. Must not loop internally.
    async fn healthcheck(&self, container: &Container) -> Result<(), Self::Error>;

    /// One-shot initialization after the container became healthy.
    async fn init(&self, _container: &Container) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Split an image reference into repository and tag.
///
/// A colon that belongs to a registry host (`localhost:5000/img`) is not a tag
/// separator. References without a tag get `latest`.
pub fn split_image_reference(reference: &str) -> (&str, &str) {
    let name_start = reference.rfind('/').map(|i| i + 1).unwrap_or(0);
    match reference[name_start..].rfind(':') {
        Some(i) => {
            let split = name_start + i;
            (&reference[..split], &reference[split + 1..])
        }
        None => (reference, "latest"),
    }
}
