//! # arbor-db
//!
//! libSQL storage and repositories for Arbor.
//!
//! Handles the two relational tables (categories, posts), the repository
//! methods on [`service::ArborService`], and the storage-facing tree
//! operations that feed `arbor-core`'s assembly.
//!
//! Uses the `libsql` crate (C `SQLite` fork) — stable API, native embedded
//! database, in-memory mode for tests.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod test_support;
pub mod updates;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and connection; repositories reach the connection
/// through [`service::ArborService`].
pub struct ArborDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ArborDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let arbor_db = Self { db, conn };
        arbor_db.run_migrations().await?;
        Ok(arbor_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
