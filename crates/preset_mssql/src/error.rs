//! Error types for the SQL Server preset.

use std::path::PathBuf;
use thiserror::Error;

/// Error reported by the database driver, kept opaque.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Preset operation result type.
pub type Result<T> = std::result::Result<T, MssqlError>;

/// Errors from probing or initializing a SQL Server container.
#[derive(Error, Debug)]
pub enum MssqlError {
    /// Could not open a session.
    #[error("can't connect to database '{database}' at {address}: {source}")]
    Connection {
        address: String,
        database: String,
        #[source]
        source: DriverError,
    },

    /// The address is not `host:port`.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The container has no mapping for the port the preset declared.
    #[error("container does not expose port '{0}'")]
    PortNotExposed(String),

    /// The healthcheck query itself failed.
    #[error("healthcheck query failed: {0}")]
    Query(#[source] DriverError),

    /// The healthcheck query ran but did not return 1.
    #[error("unexpected healthcheck result: 1 != {}", display_value(.got))]
    UnexpectedHealthcheckResult { got: Option<i32> },

    #[error("can't create database '{database}': {source}")]
    DatabaseCreation {
        database: String,
        #[source]
        source: DriverError,
    },

    /// A seed statement failed. Earlier statements stay applied.
    /// `index` is zero-based; the message counts from one.
    #[error("seed statement #{} ({statement}) failed: {source}", .index + 1)]
    SeedStatement {
        index: usize,
        statement: String,
        #[source]
        source: DriverError,
    },

    #[error("can't read queries file {}: {source}", .path.display())]
    QueriesFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_value(value: &Option<i32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NULL".to_string(),
    }
}

impl MssqlError {
    /// Whether a later attempt could plausibly succeed.
    ///
    /// The lifecycle runner retries every healthcheck failure regardless; this
    /// is for callers that want to give up early on a server that answers
    /// with the wrong value.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MssqlError::Connection { .. } | MssqlError::Query(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_result_message() {
        let err = MssqlError::UnexpectedHealthcheckResult { got: Some(2) };
        assert_eq!(err.to_string(), "unexpected healthcheck result: 1 != 2");

        let err = MssqlError::UnexpectedHealthcheckResult { got: None };
        assert_eq!(err.to_string(), "unexpected healthcheck result: 1 != NULL");
    }

    #[test]
    fn test_database_creation_message_names_database() {
        let err = MssqlError::DatabaseCreation {
            database: "mydb".to_string(),
            source: "database already exists".into(),
        };
        assert_eq!(
            err.to_string(),
            "can't create database 'mydb': database already exists"
        );
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("database already exists"));
    }

    #[test]
    fn test_seed_statement_message_counts_from_one() {
        let err = MssqlError::SeedStatement {
            index: 1,
            statement: "S2".to_string(),
            source: "Invalid object name".into(),
        };
        assert_eq!(
            err.to_string(),
            "seed statement #2 (S2) failed: Invalid object name"
        );
    }

    #[test]
    fn test_retryable() {
        let connection = MssqlError::Connection {
            address: "localhost:1433".to_string(),
            database: "master".to_string(),
            source: "connection refused".into(),
        };
        assert!(connection.is_retryable());
        assert!(!MssqlError::UnexpectedHealthcheckResult { got: Some(0) }.is_retryable());
    }
}
