//! Administrative sessions against the SQL Server inside the container.

use crate::config::ADMIN_USER;
use crate::error::{DriverError, MssqlError, Result};
use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

/// Where and as whom to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTarget {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl ConnectTarget {
    /// Administrator target for `address` (`host:port`) and `database`.
    pub fn admin(address: &str, database: &str, password: &str) -> Result<Self> {
        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| MssqlError::InvalidAddress(address.to_string()))?;
        let port = port
            .parse::<u16>()
            .map_err(|_| MssqlError::InvalidAddress(address.to_string()))?;
        if host.is_empty() {
            return Err(MssqlError::InvalidAddress(address.to_string()));
        }

        Ok(Self {
            host: host.to_string(),
            port,
            database: database.to_string(),
            user: ADMIN_USER.to_string(),
            password: password.to_string(),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ADO.NET style connection string.
    ///
    /// Database, user and password are single-quoted so `;` and `=` inside
    /// them stay part of the value.
    pub fn connection_string(&self) -> String {
        format!(
            "Server={},{};Database={};User Id={};Password={};TrustServerCertificate=true",
            self.host,
            self.port,
            quote_ado_value(&self.database),
            quote_ado_value(&self.user),
            quote_ado_value(&self.password)
        )
    }
}

/// Quote a connection string value, doubling embedded single quotes.
fn quote_ado_value(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// An open session.
#[async_trait]
pub trait Session: Send {
    /// Run a query and return the first column of the first row.
    ///
    /// `None` covers both an empty result and a NULL value.
    async fn query_scalar(&mut self, sql: &str) -> std::result::Result<Option<i32>, DriverError>;

    /// Run a statement, discarding any results.
    async fn execute(&mut self, sql: &str) -> std::result::Result<(), DriverError>;
}

/// Opens sessions.
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: Session;

    async fn connect(&self, target: &ConnectTarget)
        -> std::result::Result<Self::Session, DriverError>;
}

/// Connects with the tiberius TDS client over tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiberiusConnector;

/// A tiberius client session.
pub struct TiberiusSession {
    client: Client<Compat<TcpStream>>,
}

#[async_trait]
impl Connector for TiberiusConnector {
    type Session = TiberiusSession;

    async fn connect(
        &self,
        target: &ConnectTarget,
    ) -> std::result::Result<TiberiusSession, DriverError> {
        let mut config = Config::new();
        config.host(&target.host);
        config.port(target.port);
        config.database(&target.database);
        config.authentication(AuthMethod::sql_server(&target.user, &target.password));
        // Container images ship a self-signed certificate
        config.trust_cert();

        debug!("Connecting to {} database {}", target.address(), target.database);

        let tcp = TcpStream::connect(config.get_addr()).await?;
        tcp.set_nodelay(true)?;
        let client = Client::connect(config, tcp.compat_write()).await?;

        Ok(TiberiusSession { client })
    }
}

#[async_trait]
impl Session for TiberiusSession {
    async fn query_scalar(&mut self, sql: &str) -> std::result::Result<Option<i32>, DriverError> {
        let row = self.client.simple_query(sql).await?.into_row().await?;
        match row {
            Some(row) => Ok(row.try_get::<i32, _>(0)?),
            None => Ok(None),
        }
    }

    async fn execute(&mut self, sql: &str) -> std::result::Result<(), DriverError> {
        self.client.execute(sql, &[]).await?;
        Ok(())
    }
}
