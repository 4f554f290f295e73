//! Microsoft SQL Server preset for container-backed integration tests.
//!
//! [`MssqlPreset`] implements [`preset_core::Preset`]: it names the
//! `mcr.microsoft.com/mssql/server` image, exposes port 1433, passes the `sa`
//! password (and the EULA acceptance, when given) through the environment,
//! checks readiness with `select 1` against `master`, and on init creates the
//! configured database and runs the seed statements in order.
//!
//! # Features
//!
//! - `docker`: Start the preset on Docker via testcontainers
//! - `docker-tests`: Enable tests that require Docker
//!
//! # Usage
//!
//! ```rust,ignore
//! use preset_mssql::MssqlPreset;
//!
//! #[tokio::test]
//! async fn test_orders() {
//!     let preset = MssqlPreset::new()
//!         .with_license(true)
//!         .with_queries(["create table orders(id int)"]);
//!     let running = preset_core::docker::start(&preset).await.unwrap();
//!     let addr = running.address(preset_core::DEFAULT_PORT).unwrap();
//!     let conn_str = preset.connection_string(&addr).unwrap();
//!     // ...
//! }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod preset;

// Re-exports for convenience
pub use config::MssqlConfig;
pub use connection::{ConnectTarget, Connector, Session, TiberiusConnector, TiberiusSession};
pub use error::{DriverError, MssqlError, Result};
pub use preset::MssqlPreset;
