//! # tempo-remote
//!
//! The remote persistence/auth contract consumed by Tempo's entity caches,
//! plus two backends that satisfy it:
//!
//! - [`service::LibSqlRemote`]: libSQL-backed store (local file or `:memory:`)
//!   that scopes every statement to the signed-in user.
//! - [`memory::MemoryRemote`]: in-process store with per-operation latency and
//!   fault injection, for driving races and partial failures in tests.
//!
//! Records cross the boundary as JSON object maps ([`Record`]); typed
//! conversion happens in the caller.

pub mod contract;
pub mod error;
pub mod helpers;
pub mod memory;
mod migrations;
pub mod service;
mod test_support;

pub use contract::{Record, RemoteService};

use error::RemoteError;
use libsql::Builder;

/// Raw libSQL handle with migrations applied.
pub struct TempoDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl TempoDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, RemoteError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| RemoteError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let tempo_db = Self { db, conn };
        tempo_db.run_migrations().await?;
        Ok(tempo_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"tsk-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, RemoteError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(RemoteError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
