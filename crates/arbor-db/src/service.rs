//! Service layer wrapping the database handle.
//!
//! All repository methods are implemented as `impl ArborService` blocks in
//! `repos/`. The service owns the per-process database handle; the in-memory
//! tree structures it hands out are rebuilt per call and never cached here.

use crate::ArborDb;
use crate::error::DatabaseError;

/// Storage service for categories and posts.
pub struct ArborService {
    db: ArborDb,
}

impl ArborService {
    /// Create a service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` — Path to the libSQL database file, or `":memory:"` for
    ///   tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = ArborDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `ArborDb` (for testing).
    #[must_use]
    pub const fn from_db(db: ArborDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ArborDb {
        &self.db
    }
}
