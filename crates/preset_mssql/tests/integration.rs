//! Integration tests against a real SQL Server container.
//!
//! These tests require Docker and pull `mcr.microsoft.com/mssql/server`.
//!
//! Run with:
//!   cargo test -p preset_mssql --features docker-tests

#![cfg(feature = "docker-tests")]

use preset_core::logging::init_test_logging;
use preset_core::{docker, Preset, DEFAULT_PORT};
use preset_mssql::{ConnectTarget, Connector, MssqlError, MssqlPreset, Session, TiberiusConnector};

fn preset() -> MssqlPreset {
    MssqlPreset::new()
        .with_license(true)
        .with_database("mydb")
        .with_password("Gn0m!ck~")
        .with_queries(["create table t(id int)", "insert into t values (1)"])
}

/// The container comes up, the database is created and seeded, and the
/// healthcheck keeps answering 1.
#[tokio::test]
async fn test_mssql_end_to_end() -> anyhow::Result<()> {
    init_test_logging();

    let preset = preset();
    let running = docker::start(&preset).await?;
    let address = running
        .address(DEFAULT_PORT)
        .expect("default port is mapped");

    let mut session = preset.connect(&address, "mydb").await?;
    let count = session
        .query_scalar("select count(*) from t")
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    assert_eq!(count, Some(1));
    let id = session
        .query_scalar("select id from t")
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    assert_eq!(id, Some(1));

    let mut master = preset.connect(&address, "master").await?;
    let one = master
        .query_scalar("select 1")
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    assert_eq!(one, Some(1));

    preset.healthcheck(running.container()).await?;
    Ok(())
}

/// Running init again on the same container fails on database creation.
#[tokio::test]
async fn test_mssql_second_init_fails() -> anyhow::Result<()> {
    init_test_logging();

    let preset = preset();
    let running = docker::start(&preset).await?;

    let err = preset.init(running.container()).await.unwrap_err();
    assert!(matches!(err, MssqlError::DatabaseCreation { ref database, .. } if database == "mydb"));
    Ok(())
}

/// A failing seed statement stops the run and leaves earlier statements applied.
#[tokio::test]
async fn test_mssql_partial_seed_is_kept() -> anyhow::Result<()> {
    init_test_logging();

    let base = MssqlPreset::new().with_license(true).with_database("base");
    let running = docker::start(&base).await?;
    let address = running.address(DEFAULT_PORT).expect("default port is mapped");

    let partial = MssqlPreset::new().with_database("partial").with_queries([
        "create table t(id int)",
        "insert into missing_table values (1)",
        "insert into t values (3)",
    ]);
    let err = partial.init(running.container()).await.unwrap_err();
    match err {
        MssqlError::SeedStatement { index, statement, .. } => {
            assert_eq!(index, 1);
            assert_eq!(statement, "insert into missing_table values (1)");
        }
        other => panic!("expected seed statement error, got {other}"),
    }

    let mut session = partial.connect(&address, "partial").await?;
    let rows = session
        .query_scalar("select count(*) from t")
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    assert_eq!(rows, Some(0));
    Ok(())
}

/// The connector alone reaches a started container with the admin login.
#[tokio::test]
async fn test_tiberius_connector_admin_login() -> anyhow::Result<()> {
    init_test_logging();

    let preset = MssqlPreset::new().with_license(true);
    let running = docker::start(&preset).await?;
    let address = running.address(DEFAULT_PORT).expect("default port is mapped");

    let target = ConnectTarget::admin(&address, "master", "Gn0m!ck~")?;
    let mut session = TiberiusConnector
        .connect(&target)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    session
        .execute("select name from sys.databases")
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
