//! Database error types for arbor-db.

use thiserror::Error;

/// Errors from database operations.
///
/// `NotFound` and `CyclicHierarchy` are expected, typed outcomes; everything
/// else is a storage fault. Nothing here is ever collapsed into an empty
/// result — callers can always tell "no data" from "the query failed".
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Entity lookup returned no row.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The category parent graph contains a loop.
    #[error("cyclic category hierarchy at id {id}")]
    CyclicHierarchy { id: i64 },

    /// Invalid state encountered (e.g., a delete that would strand rows).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
