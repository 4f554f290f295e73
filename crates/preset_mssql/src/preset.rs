//! The SQL Server preset: readiness check and database initialization.

use crate::config::{MssqlConfig, MASTER_DB};
use crate::connection::{ConnectTarget, Connector, Session, TiberiusConnector};
use crate::error::{MssqlError, Result};
use async_trait::async_trait;
use preset_core::{Container, NamedPorts, Preset, DEFAULT_PORT};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Healthcheck query; the server is ready once it answers 1.
const HEALTHCHECK_QUERY: &str = "select 1";

/// Microsoft SQL Server preset.
///
/// Without configuration it creates database `mydb` and uses the `sa` login
/// with password `Gn0m!ck~`. The image only starts once the EULA is accepted
/// with [`MssqlPreset::with_license`].
///
/// # Example
///
/// ```rust,ignore
/// let preset = MssqlPreset::new()
///     .with_license(true)
///     .with_database("mydb")
///     .with_queries(["create table t(id int)", "insert into t values (1)"]);
///
/// let running = preset_core::docker::start(&preset).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MssqlPreset<C = TiberiusConnector> {
    config: MssqlConfig,
    connector: C,
}

impl MssqlPreset<TiberiusConnector> {
    pub fn new() -> Self {
        Self::from_config(MssqlConfig::default())
    }

    pub fn from_config(config: MssqlConfig) -> Self {
        Self {
            config,
            connector: TiberiusConnector,
        }
    }
}

impl Default for MssqlPreset<TiberiusConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> MssqlPreset<C> {
    /// Database the init routine creates and seeds.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.config.database = database.into();
        self
    }

    /// Password of the `sa` login. Must satisfy the SQL Server password policy.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    /// Append seed statements, run in order after the database is created.
    pub fn with_queries<I, S>(mut self, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.queries.extend(queries.into_iter().map(Into::into));
        self
    }

    pub fn with_query(self, query: impl Into<String>) -> Self {
        self.with_queries([query.into()])
    }

    /// Append a file whose whole content runs as one statement.
    ///
    /// Files are read during init and run before inline queries.
    pub fn with_queries_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.queries_files.push(path.into());
        self
    }

    /// Accept the SQL Server EULA. Required for the container to start.
    pub fn with_license(mut self, accept: bool) -> Self {
        self.config.license = accept;
        self
    }

    /// Image tag, e.g. `2022-latest`.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.config.wait_timeout = timeout;
        self
    }

    /// Swap the driver used to open sessions.
    pub fn with_connector<D: Connector>(self, connector: D) -> MssqlPreset<D> {
        MssqlPreset {
            config: self.config,
            connector,
        }
    }

    pub fn config(&self) -> &MssqlConfig {
        &self.config
    }

    /// Connection string for the configured database on `address`.
    pub fn connection_string(&self, address: &str) -> Result<String> {
        let target = ConnectTarget::admin(address, &self.config.database, &self.config.password)?;
        Ok(target.connection_string())
    }

    /// Open an administrator session to `database` on `address`.
    pub async fn connect(&self, address: &str, database: &str) -> Result<C::Session> {
        let target = ConnectTarget::admin(address, database, &self.config.password)?;
        self.connector
            .connect(&target)
            .await
            .map_err(|source| MssqlError::Connection {
                address: address.to_string(),
                database: database.to_string(),
                source,
            })
    }

    fn address(container: &Container) -> Result<String> {
        container
            .address(DEFAULT_PORT)
            .ok_or_else(|| MssqlError::PortNotExposed(DEFAULT_PORT.to_string()))
    }

    /// Statements to run after the database exists: file contents first, then
    /// inline queries.
    fn seed_statements(&self) -> Result<Vec<String>> {
        let mut statements = Vec::new();
        for path in &self.config.queries_files {
            let content =
                std::fs::read_to_string(path).map_err(|source| MssqlError::QueriesFile {
                    path: path.clone(),
                    source,
                })?;
            statements.push(content);
        }
        statements.extend(self.config.queries.iter().cloned());
        Ok(statements)
    }

    async fn check_health(&self, container: &Container) -> Result<()> {
        let address = Self::address(container)?;
        let mut session = self.connect(&address, MASTER_DB).await?;

        let got = session
            .query_scalar(HEALTHCHECK_QUERY)
            .await
            .map_err(MssqlError::Query)?;

        if got != Some(1) {
            return Err(MssqlError::UnexpectedHealthcheckResult { got });
        }

        Ok(())
    }

    async fn initialize(&self, container: &Container) -> Result<()> {
        let address = Self::address(container)?;
        let database = &self.config.database;

        let mut session = self.connect(&address, MASTER_DB).await?;
        info!("Creating database {}", database);
        session
            .execute(&format!("create database {}", database))
            .await
            .map_err(|source| MssqlError::DatabaseCreation {
                database: database.clone(),
                source,
            })?;
        drop(session);

        let statements = self.seed_statements()?;
        let mut session = self.connect(&address, database).await?;

        for (index, statement) in statements.iter().enumerate() {
            debug!("Running seed statement #{} on {}", index, database);
            session
                .execute(statement)
                .await
                .map_err(|source| MssqlError::SeedStatement {
                    index,
                    statement: statement.clone(),
                    source,
                })?;
        }

        if !statements.is_empty() {
            info!("Applied {} seed statements to {}", statements.len(), database);
        }

        Ok(())
    }
}

#[async_trait]
impl<C: Connector> Preset for MssqlPreset<C> {
    type Error = MssqlError;

    fn image(&self) -> String {
        self.config.image()
    }

    fn ports(&self) -> NamedPorts {
        NamedPorts::default_tcp(self.config.port)
    }

    fn env(&self) -> Vec<(String, String)> {
        self.config.env()
    }

    fn wait_timeout(&self) -> Duration {
        self.config.wait_timeout
    }

    async fn healthcheck(&self, container: &Container) -> Result<()> {
        self.check_health(container).await
    }

    async fn init(&self, container: &Container) -> Result<()> {
        self.initialize(container).await
    }
}
