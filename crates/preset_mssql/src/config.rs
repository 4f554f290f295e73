//! Preset configuration and defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Image repository for SQL Server on Linux.
pub const IMAGE: &str = "mcr.microsoft.com/mssql/server";

/// Default image tag.
pub const DEFAULT_VERSION: &str = "2019-latest";

/// Port SQL Server listens on inside the container.
pub const DEFAULT_PORT: u16 = 1433;

/// Database created by the init routine unless overridden.
pub const DEFAULT_DATABASE: &str = "mydb";

/// Administrator password unless overridden. Satisfies the SQL Server
/// password policy.
pub const DEFAULT_PASSWORD: &str = "Gn0m!ck~";

/// Built-in administrator login.
pub const ADMIN_USER: &str = "sa";

/// System database used for health checks and database creation.
pub const MASTER_DB: &str = "master";

/// How long the orchestrator waits for the server to come up.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the preset needs to provision a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MssqlConfig {
    /// Database created by the init routine
    pub database: String,
    /// Password of the `sa` login
    pub password: String,
    /// Statements run against `database`, in order
    pub queries: Vec<String>,
    /// Files whose contents run against `database` before `queries`
    pub queries_files: Vec<PathBuf>,
    /// Whether the SQL Server EULA is accepted
    pub license: bool,
    /// Image tag
    pub version: String,
    /// Port inside the container
    pub port: u16,
    /// Healthcheck wait budget
    pub wait_timeout: Duration,
}

impl Default for MssqlConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            queries: Vec::new(),
            queries_files: Vec::new(),
            license: false,
            version: DEFAULT_VERSION.to_string(),
            port: DEFAULT_PORT,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

impl MssqlConfig {
    /// Full image reference including the tag.
    pub fn image(&self) -> String {
        format!("{}:{}", IMAGE, self.version)
    }

    /// Environment the SQL Server image reads on startup.
    ///
    /// `ACCEPT_EULA` is only set when the license was explicitly accepted; the
    /// image refuses to start without it.
    pub fn env(&self) -> Vec<(String, String)> {
        let mut env = vec![("SA_PASSWORD".to_string(), self.password.clone())];
        if self.license {
            env.push(("ACCEPT_EULA".to_string(), "Y".to_string()));
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MssqlConfig::default();
        assert_eq!(config.database, "mydb");
        assert_eq!(config.password, "Gn0m!ck~");
        assert!(config.queries.is_empty());
        assert!(!config.license);
        assert_eq!(config.port, 1433);
        assert_eq!(config.wait_timeout, Duration::from_secs(30));
        assert_eq!(config.image(), "mcr.microsoft.com/mssql/server:2019-latest");
    }

    #[test]
    fn test_env_without_license() {
        let config = MssqlConfig::default();
        let env = config.env();
        assert_eq!(env, vec![("SA_PASSWORD".to_string(), "Gn0m!ck~".to_string())]);
        assert!(env.iter().all(|(k, _)| k != "ACCEPT_EULA"));
    }

    #[test]
    fn test_env_with_license() {
        let config = MssqlConfig {
            license: true,
            password: "S3cret!pass".to_string(),
            ..MssqlConfig::default()
        };
        let env = config.env();
        assert!(env.contains(&("SA_PASSWORD".to_string(), "S3cret!pass".to_string())));
        assert!(env.contains(&("ACCEPT_EULA".to_string(), "Y".to_string())));
        assert_eq!(env.iter().filter(|(k, _)| k == "ACCEPT_EULA").count(), 1);
    }
}
