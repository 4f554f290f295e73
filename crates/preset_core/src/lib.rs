//! Container presets for database integration tests.
//!
//! A [`Preset`] declares what to run (image, ports, environment) and how to
//! tell it is usable (a single-attempt healthcheck plus a one-shot init
//! routine). The [`lifecycle`] module drives those routines against a started
//! [`Container`]: the healthcheck is polled until it succeeds or the preset's
//! wait timeout elapses, then init runs exactly once.
//!
//! # Features
//!
//! - `docker`: Start presets on Docker via testcontainers
//!
//! # Usage
//!
//! ```rust,ignore
//! use preset_core::docker;
//!
//! #[tokio::test]
//! async fn test_with_database() {
//!     let running = docker::start(&my_preset).await.unwrap();
//!     let addr = running.address(preset_core::DEFAULT_PORT).unwrap();
//!     // connect to addr...
//! }
//! ```

pub mod container;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod ports;
pub mod preset;

#[cfg(feature = "docker")]
pub mod docker;

// Re-exports for convenience
pub use container::Container;
pub use error::LifecycleError;
pub use lifecycle::{initialize, ready, wait_for_healthy, WaitConfig};
pub use ports::{NamedPorts, Port, Protocol, DEFAULT_PORT};
pub use preset::{Preset, DEFAULT_WAIT_TIMEOUT};
