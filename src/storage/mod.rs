pub mod repository;

use std::path::{Path, PathBuf};

use rusqlite_migration::{Migrations, M};

use crate::error::{Error, Result};

const DATA_DIR: &str = ".forge-analytics";
const DB_FILE: &str = "forge-analytics.db";

// Run on every connection, writer and reader alike.
const CONNECTION_PRAGMAS: &str = "PRAGMA journal_mode=WAL;
     PRAGMA foreign_keys=ON;
     PRAGMA busy_timeout=5000;";

/// Project store schema, oldest step first. `user_version` records how many
/// steps a database file has applied.
fn migrations() -> Migrations<'static> {
    Migrations::new(vec![
        M::up(include_str!("migrations/001_initial.sql")),
        M::up(include_str!("migrations/002_project_order.sql")),
    ])
}

/// SQLite project store.
///
/// Creates and deletes go through the writer; listing and lookups go through
/// the reader. On disk these are two WAL connections to the same file, so a
/// reload never waits behind a write. An in-memory store has one connection
/// serving both roles.
#[derive(Clone)]
pub struct Database {
    writer: tokio_rusqlite::Connection,
    reader: tokio_rusqlite::Connection,
}

impl Database {
    /// `~/.forge-analytics/forge-analytics.db`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("cannot determine home directory".into()))?;
        Ok(home.join(DATA_DIR).join(DB_FILE))
    }

    /// Open the store at [`default_path`](Self::default_path), creating its
    /// directory on first use.
    pub async fn open() -> Result<Self> {
        let path = Self::default_path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::Config(format!("{}: {e}", dir.display())))?;
        }
        Self::open_at(path).await
    }

    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening project store at {}", path.display());

        let writer = connect(tokio_rusqlite::Connection::open(path).await?).await?;
        migrate(&writer, migrations).await?;
        let reader = connect(tokio_rusqlite::Connection::open(path).await?).await?;

        Ok(Self { writer, reader })
    }

    /// Throwaway store for tests.
    pub async fn open_memory() -> Result<Self> {
        let conn = connect(tokio_rusqlite::Connection::open_in_memory().await?).await?;
        migrate(&conn, migrations).await?;
        Ok(Self {
            reader: conn.clone(),
            writer: conn,
        })
    }

    /// Number of schema steps applied to this store.
    pub async fn schema_version(&self) -> Result<usize> {
        let version = self
            .reader
            .call(|conn| conn.query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0)))
            .await?;
        Ok(usize::try_from(version).unwrap_or(0))
    }

    pub fn writer(&self) -> &tokio_rusqlite::Connection {
        &self.writer
    }

    pub fn reader(&self) -> &tokio_rusqlite::Connection {
        &self.reader
    }
}

async fn connect(conn: tokio_rusqlite::Connection) -> Result<tokio_rusqlite::Connection> {
    conn.call(|conn| conn.execute_batch(CONNECTION_PRAGMAS)).await?;
    Ok(conn)
}

/// Bring the schema up to date. A failed step is reported as
/// [`Error::Migration`]; losing the connection itself is a database error.
async fn migrate(
    conn: &tokio_rusqlite::Connection,
    steps: fn() -> Migrations<'static>,
) -> Result<()> {
    let outcome = conn
        .call(move |conn| Ok::<_, rusqlite::Error>(steps().to_latest(conn)))
        .await?;
    outcome?;
    Ok(())
}
